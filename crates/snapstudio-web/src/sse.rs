//! Server-Sent Events for live updates

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use snapstudio_core::{DataEvent, EventBus};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Create an SSE stream from the event bus
/// Takes EventBus by value (cheap clone, Arc internally)
pub fn create_sse_stream(
    event_bus: EventBus,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = event_bus.subscribe();
    let stream = BroadcastStream::new(rx);

    let sse_stream = stream.filter_map(|result: Result<DataEvent, _>| {
        result.ok().map(|event: DataEvent| {
            let (event_type, data) = match event {
                DataEvent::WorkflowUpdated(id) => {
                    ("workflow_updated", format!(r#"{{"id":"{}"}}"#, id))
                }
                DataEvent::ActivityLogged(id) => {
                    ("activity_logged", format!(r#"{{"id":"{}"}}"#, id))
                }
                DataEvent::ConversationUpdated(id) => {
                    ("conversation_updated", format!(r#"{{"id":"{}"}}"#, id))
                }
                DataEvent::ContactCreated(id) => {
                    ("contact_created", format!(r#"{{"id":"{}"}}"#, id))
                }
                DataEvent::PlanChanged(tier) => {
                    ("plan_changed", format!(r#"{{"plan":"{}"}}"#, tier))
                }
            };

            Ok(Event::default().event(event_type).data(data))
        })
    });

    Sse::new(sse_stream).keep_alive(KeepAlive::default())
}
