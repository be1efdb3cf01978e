use quizbird::app::App;
use quizbird::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG-controlled logging; goes to stderr so it does not fight
    // the alternate screen.
    pretty_env_logger::init();

    let mut app = App::new()?;
    app.init()?;
    let outcome = app.run().await;
    app.restore()?;
    outcome
}
