//! Application shell.
//!
//! One shell, and so one router, per process. [`init`] builds it, installs
//! the panic hook, and runs start-up; [`app`] returns it afterwards. There
//! is no teardown.

pub mod app;
pub mod error_handler;

use std::sync::Arc;

use tokio::sync::OnceCell;

pub use app::{Application, Collaborators, ShellError};
pub use error_handler::ErrorHandler;

use crate::config::ShellConfig;

static SHELL: OnceCell<Application> = OnceCell::const_new();

/// Build and start the process-wide shell.
///
/// Concurrent callers wait for the first one; only it mounts. A failed mount
/// leaves the slot empty.
pub async fn init(config: ShellConfig, host: Collaborators) -> Result<&'static Application, ShellError> {
    let mut mounted_here = false;
    let shell = SHELL
        .get_or_try_init(|| {
            mounted_here = true;
            Application::mount(config, host)
        })
        .await?;
    if !mounted_here {
        return Err(ShellError::AlreadyInitialized);
    }

    Arc::clone(shell.errors()).install_panic_hook();
    shell.start().await;
    Ok(shell)
}

/// The process-wide shell, once [`init`] has mounted it.
pub fn app() -> Option<&'static Application> {
    SHELL.get()
}
