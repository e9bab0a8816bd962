use crate::archive::{self, Archive};
use crate::context::{BuildOutput, Context};
use crate::manifest::{self, FunctionManifest, HostManifest};
use crate::preset::{CompiledHook, Hooks, Preset};
use crate::result::Result;
use crate::tpl::Tpl;
use crate::utils;
use std::fmt;

pub const ARCHIVE_FILE: &str = "deploy.zip";

const DEPLOY_COMMAND: &str =
    "az functionapp deployment source config-zip -g <resource-group> -n <app-name> --src $ZIP_PATH";

pub fn preset() -> Preset {
    Preset {
        name: "azure",
        extends: None,
        entry: "$RUNTIME_DIR/entries/azure",
        serve_static: true,
        inline_chunks: Some(false),
        preview: None,
        hooks: Hooks {
            compiled: vec![compiled as CompiledHook],
        },
    }
}

/// Packaging progress; each stage is entered only once the previous one succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ManifestsPending,
    ManifestsWritten,
    Archiving,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::ManifestsPending => "writing manifests",
            Stage::ManifestsWritten => "manifests written",
            Stage::Archiving => "archiving",
            Stage::Done => "done",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of a successful packaging run
#[derive(Debug, Clone)]
pub struct Deployment {
    pub archive: Archive,
    /// Command the operator runs to upload the archive
    pub command: String,
}

impl Deployment {
    pub fn message(&self) -> String {
        format!("Ready to run `{}`", self.command)
    }
}

fn compiled(ctx: &Context, output: &BuildOutput) -> Result<Option<String>> {
    let deployment = package(ctx, output)?;
    Ok(Some(deployment.message()))
}

/// Write the host and function manifests, then zip the deployment root.
///
/// The archive always contains both manifests. Any failure aborts the run
/// before the next stage and is returned as is.
pub fn package(ctx: &Context, output: &BuildOutput) -> Result<Deployment> {
    trace(ctx, Stage::ManifestsPending);
    manifest::write_json(
        &output.server_dir.join(manifest::FUNCTION_FILE),
        &FunctionManifest::default(),
    )?;
    manifest::write_json(
        &output.root_dir.join(manifest::HOST_FILE),
        &HostManifest::default(),
    )?;
    trace(ctx, Stage::ManifestsWritten);

    trace(ctx, Stage::Archiving);
    let destination = output.root_dir.join(ARCHIVE_FILE);
    let archive = archive::zip_directory(ctx, &output.root_dir, &destination)?;
    if ctx.verbose {
        println!("azure: archived {} files ({} bytes)", archive.entries, archive.size);
    }

    let mut tpl = Tpl::new();
    tpl.register("ZIP_PATH", utils::pretty_path(&archive.path, &ctx.base_dir));
    let command = tpl.parse(DEPLOY_COMMAND);
    trace(ctx, Stage::Done);

    Ok(Deployment { archive, command })
}

fn trace(ctx: &Context, stage: Stage) {
    if ctx.verbose {
        println!("azure: {}", stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::Value;
    use std::collections::BTreeMap;
    use std::fs::{self, File};
    use std::io::Read;
    use std::path::Path;
    use zip::ZipArchive;

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn extract(path: &Path) -> BTreeMap<String, String> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut files = BTreeMap::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            if entry.is_file() {
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                files.insert(entry.name().to_string(), content);
            }
        }
        files
    }

    #[test]
    fn test_package_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("index.html"), "hi").unwrap();
        let output = BuildOutput::with_default_server_dir(root);
        let ctx = Context::new(root.to_path_buf(), false);

        let deployment = package(&ctx, &output).unwrap();

        let function = read_json(&root.join("server/function.json"));
        assert_eq!(function["entryPoint"], "handle");
        let host = read_json(&root.join("host.json"));
        assert_eq!(host["version"], "2.0");

        let zip_path = root.join("deploy.zip");
        assert_eq!(deployment.archive.path, zip_path);
        assert!(fs::metadata(&zip_path).unwrap().len() > 0);

        let files = extract(&zip_path);
        assert_eq!(
            files.keys().collect::<Vec<_>>(),
            ["host.json", "index.html", "server/function.json"]
        );
        assert_eq!(files["index.html"], "hi");
        assert_eq!(
            files["host.json"],
            fs::read_to_string(root.join("host.json")).unwrap()
        );
    }

    #[test]
    fn test_package_manifests_match_fixed_shape() {
        let dir = tempfile::tempdir().unwrap();
        let output = BuildOutput::with_default_server_dir(dir.path());
        let ctx = Context::new(dir.path().to_path_buf(), false);

        package(&ctx, &output).unwrap();

        let function: FunctionManifest =
            serde_json::from_str(&fs::read_to_string(output.server_dir.join("function.json")).unwrap())
                .unwrap();
        assert_eq!(function, FunctionManifest::default());
        let host: HostManifest =
            serde_json::from_str(&fs::read_to_string(output.root_dir.join("host.json")).unwrap())
                .unwrap();
        assert_eq!(host, HostManifest::default());
    }

    #[test]
    fn test_package_twice_same_contents() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("public")).unwrap();
        fs::write(root.join("public/app.js"), "console.log(1)").unwrap();
        let output = BuildOutput::with_default_server_dir(root);
        let ctx = Context::new(root.to_path_buf(), false);

        let first = package(&ctx, &output).unwrap();
        let first_files = extract(&first.archive.path);
        let second = package(&ctx, &output).unwrap();
        let second_files = extract(&second.archive.path);

        assert_eq!(first_files, second_files);
        assert!(!second_files.contains_key(ARCHIVE_FILE));
    }

    #[test]
    fn test_package_manifest_failure_skips_archive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        // server_dir is a regular file, so function.json cannot be created
        fs::write(root.join("server"), "not a directory").unwrap();
        let output = BuildOutput::with_default_server_dir(root);
        let ctx = Context::new(root.to_path_buf(), false);

        let err = package(&ctx, &output).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(!root.join(ARCHIVE_FILE).exists());
        assert!(!root.join("host.json").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_package_with_dangling_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("index.html"), "hi").unwrap();
        std::os::unix::fs::symlink("gone", root.join("dangling")).unwrap();
        let output = BuildOutput::with_default_server_dir(root);
        let ctx = Context::new(root.to_path_buf(), false);

        let deployment = package(&ctx, &output).unwrap();

        let archive = ZipArchive::new(File::open(&deployment.archive.path).unwrap()).unwrap();
        assert!(archive.file_names().any(|name| name == "dangling"));
        let files = extract(&deployment.archive.path);
        assert_eq!(files["index.html"], "hi");
    }

    #[test]
    fn test_package_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("missing");
        let output = BuildOutput::new(&root, dir.path().join("server"));
        let ctx = Context::new(dir.path().to_path_buf(), false);

        // writing host.json creates the root
        let deployment = package(&ctx, &output).unwrap();
        let files = extract(&deployment.archive.path);
        assert_eq!(files.keys().collect::<Vec<_>>(), ["host.json"]);
    }

    #[test]
    fn test_deploy_command() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".output");
        fs::create_dir_all(&root).unwrap();
        let output = BuildOutput::with_default_server_dir(&root);
        let ctx = Context::new(dir.path().to_path_buf(), false);

        let deployment = package(&ctx, &output).unwrap();
        let zip_path = Path::new(".output").join("deploy.zip");
        assert_eq!(
            deployment.command,
            format!(
                "az functionapp deployment source config-zip -g <resource-group> -n <app-name> --src {}",
                zip_path.display()
            )
        );
        assert!(deployment.message().starts_with("Ready to run `az functionapp"));
    }

    #[test]
    fn test_compiled_hook_message() {
        let dir = tempfile::tempdir().unwrap();
        let output = BuildOutput::with_default_server_dir(dir.path());
        let ctx = Context::new(dir.path().to_path_buf(), false);

        let message = compiled(&ctx, &output).unwrap().unwrap();
        assert!(message.contains("--src deploy.zip"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::ManifestsPending.to_string(), "writing manifests");
        assert_eq!(Stage::Done.to_string(), "done");
    }
}
