use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, error, info, instrument};

use crate::{
    message::{Request, Section},
    state::{Fetcher, Outcome},
    ui::input::Command,
    App,
};

/// Every request gets its own task: nothing is de-duplicated or cancelled.
#[instrument(skip(fetcher))]
pub fn handle_background_request(fetcher: &Fetcher, request: Request) -> JoinHandle<Outcome> {
    info!("Request type: {:?}", request);
    let fetcher = fetcher.clone();
    match request {
        Request::Media => tokio::spawn(async move { fetcher.fetch_media().await }),
        Request::Joke => tokio::spawn(async move { fetcher.fetch_joke().await }),
    }
}

/// Returns once the channel closes and every request already started has finished.
pub async fn run_worker(fetcher: Fetcher, mut receiver: UnboundedReceiver<Request>) {
    let mut in_flight: Vec<JoinHandle<Outcome>> = Vec::new();
    while let Some(r) = receiver.recv().await {
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle_background_request(&fetcher, r));
    }
    info!(pending = in_flight.len(), "request channel closed, stopping worker");
    for handle in in_flight {
        if let Err(e) = handle.await {
            error!("fetch task failed: {e}");
        }
    }
}


#[instrument(skip(app, sender))]
pub fn handle_user_input(app: &mut App, sender: &UnboundedSender<Request>, i: Command) {
    match i {
        Command::Next => {
            info!("Fetch next media");
            if let Err(e) = sender.send(Request::Media) {
                error!("failed to send message {:?}", e);
            }
            app.section = Section::Media;
        }
        Command::Joke if app.jokes_enabled => {
            if let Err(e) = sender.send(Request::Joke) {
                error!("failed to send message {:?}", e);
            }
            app.section = Section::Media;
        }
        Command::Goto(section) => {
            debug!(anchor = section.anchor());
            app.section = section;
        }
        _ => {
            debug!("no op {input:?}", input = i);
        }
    }
}
