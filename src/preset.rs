use crate::context::{BuildOutput, Context};
use crate::error::Error;
use crate::presets;
use crate::result::Result;
use crate::tpl::Tpl;

/// Runs once the build output is finalized; may return a message for the operator
pub type CompiledHook = fn(&Context, &BuildOutput) -> Result<Option<String>>;

/// Post-build callbacks registered by a preset, run in order
#[derive(Default, Clone)]
pub struct Hooks {
    pub compiled: Vec<CompiledHook>,
}

/// Named deployment target selecting the runtime entry and post-build steps
#[derive(Clone)]
pub struct Preset {
    pub name: &'static str,
    /// Preset this one is derived from (informational only)
    pub extends: Option<&'static str>,
    /// Runtime entry template, `$RUNTIME_DIR` is resolved from the context
    pub entry: &'static str,
    pub serve_static: bool,
    pub inline_chunks: Option<bool>,
    /// Command serving the build locally
    pub preview: Option<&'static str>,
    pub hooks: Hooks,
}

impl Preset {
    /// All known presets
    pub fn all() -> Vec<Preset> {
        vec![presets::azure::preset(), presets::node_server::preset()]
    }

    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(|p| p.name).collect()
    }

    /// Look up a preset by name
    pub fn find(name: &str) -> Result<Preset> {
        Self::all()
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownPreset(name.to_string(), Self::names().join(", ")))
    }

    /// Resolve the runtime entry path for this preset
    pub fn entry(&self, ctx: &Context) -> String {
        let mut tpl = Tpl::new();
        tpl.register("RUNTIME_DIR", ctx.runtime_dir.display().to_string());
        tpl.parse(self.entry)
    }

    /// Run the post-build hooks in order, stopping at the first failure
    pub fn run_compiled(&self, ctx: &Context, output: &BuildOutput) -> Result<Vec<String>> {
        let mut messages = Vec::new();
        for hook in &self.hooks.compiled {
            if let Some(message) = hook(ctx, output)? {
                messages.push(message);
            }
        }
        Ok(messages)
    }
}

impl std::fmt::Debug for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preset")
            .field("name", &self.name)
            .field("extends", &self.extends)
            .field("entry", &self.entry)
            .field("serve_static", &self.serve_static)
            .field("inline_chunks", &self.inline_chunks)
            .field("preview", &self.preview)
            .field("hooks", &self.hooks.compiled.len())
            .finish()
    }
}
