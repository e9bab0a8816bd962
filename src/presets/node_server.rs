use crate::preset::{Hooks, Preset};

/// Node preset with a standalone server entry; packaging is left to the user
pub fn preset() -> Preset {
    Preset {
        name: "node-server",
        extends: Some("node"),
        entry: "$RUNTIME_DIR/entries/node-server",
        serve_static: true,
        inline_chunks: None,
        preview: Some("node ./server/index.mjs"),
        hooks: Hooks::default(),
    }
}
