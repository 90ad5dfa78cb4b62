use gfx_primer::{
    app,
    boot::{self, LOGIC_LOOP, RENDER_LOOP},
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::init_logging();
    println!("{}", boot::BANNER);

    let (events, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("{event}");
        }
    });

    let completed = boot::run(&[LOGIC_LOOP, RENDER_LOOP], events).await?;
    printer.await?;
    log::debug!("loops completed {completed:?} iterations");

    Ok(())
}
