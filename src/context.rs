use std::{path::PathBuf, sync::OnceLock};

#[derive(Debug)]
pub(crate) struct Context {
    pub file_path: PathBuf,

    pub duplicate_heading: bool,
    pub dry_run: bool,
}

static CONTEXT: OnceLock<Context> = OnceLock::new();

impl Context {
    pub fn init(file_path: PathBuf, duplicate_heading: bool, dry_run: bool) -> anyhow::Result<()> {
        CONTEXT
            .set(Self {
                file_path,
                duplicate_heading,
                dry_run,
            })
            .map_err(|_| anyhow::anyhow!("context is already initialized"))
    }

    pub fn instance() -> &'static Context {
        CONTEXT.get().expect("context is not initialized")
    }
}
