//! The process-wide shell. Kept in its own binary: `init` can succeed once.

use care_journey::host::Document;
use care_journey::shell::{self, ShellError};

mod common;
use common::TestHost;

#[tokio::test]
async fn test_single_shell_per_process() {
    assert!(shell::app().is_none());

    let config = common::test_config(&common::unreachable_base_url().await);
    let first = TestHost::new(&config);
    let second = TestHost::new(&config);

    let (a, b) = tokio::join!(
        shell::init(config.clone(), first.collaborators(&config)),
        shell::init(config.clone(), second.collaborators(&config))
    );

    let (app, loser) = match (a, b) {
        (Ok(app), Err(e)) => (app, (e, &second)),
        (Err(e), Ok(app)) => (app, (e, &first)),
        _ => panic!("exactly one concurrent init must succeed"),
    };
    assert!(matches!(loser.0, ShellError::AlreadyInitialized));
    // The losing host was never mounted into.
    assert_eq!(loser.1.document.inner_html("#app").as_deref(), Some(""));
    assert_eq!(app.current_state().path, "/");
    assert!(std::ptr::eq(app, shell::app().unwrap()));

    let again = TestHost::new(&config);
    let err = shell::init(config.clone(), again.collaborators(&config))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ShellError::AlreadyInitialized));
    assert_eq!(again.document.inner_html("#app").as_deref(), Some(""));
}
