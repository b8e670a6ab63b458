use canonopts::{CanonError, CompilerHandle, NormalizedOptions, Translator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CanonError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/webapp.json".to_owned());

    let options = NormalizedOptions::from_file(&path)?;
    let compiler = CompilerHandle::new("from-json");
    let canonical = Translator::new(&compiler).translate(&options)?;

    println!("{}", serde_json::to_string_pretty(&canonical)?);
    Ok(())
}
