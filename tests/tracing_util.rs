use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

/// Installs a per-test subscriber so router tracing output lands in the
/// captured test writer instead of being dropped.
pub struct TestTracing {
    _guard: DefaultGuard,
}

impl TestTracing {
    pub fn init() -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        Self {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}
