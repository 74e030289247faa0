use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the socket server and the config watcher on a background tokio runtime.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<()> {
    let rt = Runtime::new()?;

    thread::Builder::new()
        .name("rondel-services".into())
        .spawn(move || {
            rt.block_on(async {
                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::sys::server::run_server(tx).await;
                    });
                }

                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(tx).await;
                    });
                }

                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if tokio::signal::ctrl_c().await.is_ok() {
                            let _ = tx.send(AppEvent::Shutdown).await;
                        }
                    });
                }

                std::future::pending::<()>().await;
            });
        })?;
    Ok(())
}
