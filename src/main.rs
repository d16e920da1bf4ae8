use badgewheel_bridge::MessageFromBackend;
use badgewheel_bridge::notification::NotificationType;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let channels = badgewheel_bridge::BridgeChannels::default();
    badgewheel_backend::run(channels.backend_rx, channels.backend_tx);

    // Headless stand-in for the web control surface: hold the command sender
    // open and log backend events until the process is stopped.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let _surface_tx = channels.surface_tx;
        let mut surface_rx = channels.surface_rx;
        while let Some(event) = surface_rx.recv().await {
            match event {
                MessageFromBackend::NotificationMessage(n) => match n.notification_type {
                    NotificationType::Error => log::error!("{}", n.message),
                    NotificationType::Warning => log::warn!("{}", n.message),
                    _ => log::info!("{}", n.message),
                },
                MessageFromBackend::CommandRejected { reason } => {
                    log::warn!("command rejected: {reason}");
                }
                other => log::debug!("backend event: {other:?}"),
            }
        }
    });
    Ok(())
}
