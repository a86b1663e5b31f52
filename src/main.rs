use calc_shell::config::load_dotenv;
use calc_shell::{logging, App, Settings};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv()?;
    let settings = Settings::from_env();
    logging::init(&settings)?;
    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let mut app = App::new(settings)?;
    app.start()
}
