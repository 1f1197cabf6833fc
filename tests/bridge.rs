mod common;

#[cfg(test)]
mod tests {
    use super::common::{at, controller, workspace, MockNotifier, MockPrompter, MockTracker, Shown};
    use clockin::db::state::State;
    use clockin::libs::bridge::{
        dispatch, read_events, serve, Answer, BridgePrompter, BridgeSurface, BridgeWriter, CommandName, EditorEvent, Incoming, Outgoing,
    };
    use clockin::libs::config::IdleConfig;
    use clockin::libs::controller::Controller;
    use clockin::libs::messages::Message;
    use clockin::libs::prompts::{Prompter, Selection};
    use clockin::libs::providers::ViewKind;
    use clockin::libs::summary::StatusDisplay;
    use clockin::libs::surface::Surface;
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration as StdDuration;
    use tokio::sync::mpsc;

    /// Collects everything written through a [`BridgeWriter`].
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn lines(&self) -> Vec<Value> {
            let bytes = self.0.lock().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn writer() -> (BridgeWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (BridgeWriter::new(buffer.clone()), buffer)
    }

    #[test]
    fn test_incoming_messages_parse() {
        let focus: Incoming = serde_json::from_str(r#"{"type":"focus","focused":false}"#).unwrap();
        assert_eq!(focus, Incoming::Focus { focused: false });

        let status: Incoming = serde_json::from_str(r#"{"type":"status"}"#).unwrap();
        assert_eq!(status, Incoming::Status { refresh_average: false });

        let command: Incoming = serde_json::from_str(r#"{"type":"command","name":"resume"}"#).unwrap();
        assert_eq!(command, Incoming::Command { name: CommandName::Resume });

        let answer: Incoming = serde_json::from_str(r#"{"type":"answer","id":3}"#).unwrap();
        assert_eq!(answer, Incoming::Answer(Answer { id: 3, value: Value::Null }));
    }

    #[test]
    fn test_unknown_messages_are_rejected() {
        assert!(serde_json::from_str::<Incoming>(r#"{"type":"shutdown"}"#).is_err());
        assert!(serde_json::from_str::<Incoming>(r#"{"type":"command","name":"pause"}"#).is_err());
    }

    #[test]
    fn test_outgoing_messages_serialize() {
        let refresh = Outgoing::Refresh {
            view: ViewKind::TimeEntries,
            element: None,
        };
        assert_eq!(
            serde_json::to_value(&refresh).unwrap(),
            json!({"type": "refresh", "view": "time_entries", "element": null})
        );

        let status = Outgoing::Status(StatusDisplay {
            text: "1 hr | 2 hrs".to_string(),
            tooltip: "tip".to_string(),
            color: "#ff9800".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"type": "status", "text": "1 hr | 2 hrs", "tooltip": "tip", "color": "#ff9800"})
        );
    }

    #[test]
    fn test_surface_writes_one_line_per_message() {
        let (writer, buffer) = writer();
        let surface = BridgeSurface::new(writer);

        surface.info(&Message::TrackingStarted);
        surface.error(&Message::TrackingNotActive);

        assert_eq!(
            buffer.lines(),
            vec![
                json!({"type": "notify", "level": "info", "message": "Tracking started"}),
                json!({"type": "notify", "level": "error", "message": "No time entry is being tracked"}),
            ]
        );
    }

    #[test]
    fn test_providers_forward_refreshes() {
        let (writer, buffer) = writer();
        let store = clockin::libs::bridge::providers(&writer);

        store.refresh_all(&ViewKind::PROJECT_DEPENDENTS);
        store.refresh(ViewKind::Projects, Some("p1"));

        let views: Vec<Value> = buffer.lines().into_iter().map(|line| line["view"].clone()).collect();
        assert_eq!(views, vec![json!("projects"), json!("tasks"), json!("time_entries"), json!("projects")]);
        assert_eq!(buffer.lines()[3]["element"], "p1");
    }

    #[tokio::test]
    async fn test_prompter_matches_answers_by_id() {
        let (writer, buffer) = writer();
        let (answers_tx, answers_rx) = mpsc::unbounded_channel();
        let prompter = BridgePrompter::new(writer, answers_rx);
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        answers_tx.send(Answer { id: 7, value: json!(0) }).unwrap();
        answers_tx.send(Answer { id: 1, value: json!(2) }).unwrap();
        assert_eq!(prompter.select("Pick", &items).await.unwrap(), Selection::Selected(2));

        let prompt = &buffer.lines()[0];
        assert_eq!(prompt["type"], "prompt");
        assert_eq!(prompt["id"], 1);
        assert_eq!(prompt["kind"], "select");
        assert_eq!(prompt["items"], json!(["a", "b", "c"]));
        assert!(prompt.get("default").is_none());
    }

    #[tokio::test]
    async fn test_prompter_invalid_answers_cancel() {
        let (writer, _buffer) = writer();
        let (answers_tx, answers_rx) = mpsc::unbounded_channel();
        let prompter = BridgePrompter::new(writer, answers_rx);
        let items = vec!["a".to_string()];

        answers_tx.send(Answer { id: 1, value: json!(5) }).unwrap();
        answers_tx.send(Answer { id: 2, value: json!("yes") }).unwrap();
        answers_tx.send(Answer { id: 3, value: json!([0, 4]) }).unwrap();
        answers_tx.send(Answer { id: 4, value: Value::Null }).unwrap();

        assert!(prompter.select("Pick", &items).await.unwrap().is_cancelled());
        assert!(prompter.confirm("Sure?", true).await.unwrap().is_cancelled());
        assert!(prompter.multi_select("Tags", &items).await.unwrap().is_cancelled());
        assert!(prompter.input("Name", None).await.unwrap().is_cancelled());
    }

    #[tokio::test]
    async fn test_prompter_sends_defaults() {
        let (writer, buffer) = writer();
        let (answers_tx, answers_rx) = mpsc::unbounded_channel();
        let prompter = BridgePrompter::new(writer, answers_rx);

        answers_tx.send(Answer { id: 1, value: json!("docs") }).unwrap();
        answers_tx.send(Answer { id: 2, value: json!(false) }).unwrap();

        assert_eq!(prompter.input("Description", Some("draft")).await.unwrap(), Selection::Selected("docs".to_string()));
        assert_eq!(prompter.confirm("Billable?", true).await.unwrap(), Selection::Selected(false));

        let lines = buffer.lines();
        assert_eq!(lines[0]["default"], "draft");
        assert_eq!(lines[1]["kind"], "confirm");
        assert_eq!(lines[1]["default"], true);
    }

    #[tokio::test]
    async fn test_prompter_fails_when_input_closes() {
        let (writer, _buffer) = writer();
        let (answers_tx, answers_rx) = mpsc::unbounded_channel::<Answer>();
        let prompter = BridgePrompter::new(writer, answers_rx);
        drop(answers_tx);

        let err = prompter.confirm("Sure?", false).await.unwrap_err();
        assert_eq!(err.to_string(), Message::WatcherInputClosed.to_string());
    }

    #[tokio::test]
    async fn test_read_events_routes_answers_and_skips_garbage() {
        let input = concat!(
            "{\"type\":\"focus\",\"focused\":false}\n",
            "\n",
            "not json\n",
            "{\"type\":\"answer\",\"id\":1,\"value\":0}\n",
            "{\"type\":\"command\",\"name\":\"stop\"}\n",
        );
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let (answers_tx, mut answers_rx) = mpsc::unbounded_channel();

        read_events(input.as_bytes(), events_tx, answers_tx).await.unwrap();

        let first = events_rx.recv().await.unwrap();
        assert_eq!(first.message, Incoming::Focus { focused: false });
        let second = events_rx.recv().await.unwrap();
        assert_eq!(second.message, Incoming::Command { name: CommandName::Stop });
        assert!(events_rx.recv().await.is_none());

        assert_eq!(answers_rx.recv().await.unwrap(), Answer { id: 1, value: json!(0) });
        assert!(answers_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_stop_without_tracking() {
        let (mut controller, recorder) = controller(MockTracker::default(), MockPrompter::default());
        let event = EditorEvent {
            received_at: at(9, 0),
            message: Incoming::Command { name: CommandName::Stop },
        };

        dispatch(&mut controller, event).await.unwrap();

        assert_eq!(recorder.infos(), vec![Message::TrackingNotActive.to_string()]);
        assert!(controller.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_status_without_workspace() {
        let (mut controller, recorder) = controller(MockTracker::default(), MockPrompter::default());
        let event = EditorEvent {
            received_at: at(9, 0),
            message: Incoming::Status { refresh_average: true },
        };

        dispatch(&mut controller, event).await.unwrap();

        let shown = recorder.shown.lock().clone();
        assert!(matches!(shown.first(), Some(Shown::Error(_))));
        assert_eq!(recorder.statuses()[0].text, "0 hrs | 0 hrs");
    }

    #[tokio::test]
    async fn test_dispatch_focus_while_idle() {
        let (mut controller, recorder) = controller(MockTracker::default(), MockPrompter::default());
        for focused in [false, true] {
            let event = EditorEvent {
                received_at: at(9, 0),
                message: Incoming::Focus { focused },
            };
            dispatch(&mut controller, event).await.unwrap();
        }

        assert!(controller.prompter().asked().is_empty());
        assert!(recorder.shown.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_serve_stops_while_a_prompt_is_pending() {
        let (writer, buffer) = writer();
        let (_answers_tx, answers_rx) = mpsc::unbounded_channel();
        let api = MockTracker {
            workspaces: vec![workspace("w1", "Personal")],
            ..Default::default()
        };
        let mut controller = Controller::new(
            api,
            BridgePrompter::new(writer.clone(), answers_rx),
            MockNotifier::default(),
            State::in_memory().unwrap(),
            Box::new(BridgeSurface::new(writer.clone())),
            clockin::libs::bridge::providers(&writer),
            &IdleConfig::default(),
        );

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        events_tx
            .send(EditorEvent {
                received_at: at(9, 0),
                message: Incoming::Command { name: CommandName::Start },
            })
            .unwrap();

        let errors = Mutex::new(Vec::new());
        let served = tokio::time::timeout(
            StdDuration::from_secs(60),
            serve(&mut controller, events_rx, tokio::time::sleep(StdDuration::from_secs(5)), |e| {
                errors.lock().push(e.to_string())
            }),
        )
        .await;

        assert!(served.is_ok());
        assert!(errors.lock().is_empty());
        assert!(buffer.lines().iter().any(|line| line["type"] == "prompt"));
        assert!(controller.api().starts().is_empty());
        drop(events_tx);
    }

    #[tokio::test]
    async fn test_serve_ends_when_input_closes() {
        let (mut controller, recorder) = controller(MockTracker::default(), MockPrompter::default());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        events_tx
            .send(EditorEvent {
                received_at: at(9, 0),
                message: Incoming::Command { name: CommandName::Stop },
            })
            .unwrap();
        drop(events_tx);

        serve(&mut controller, events_rx, std::future::pending::<()>(), |e| panic!("unexpected error: {}", e)).await;

        assert_eq!(recorder.infos(), vec![Message::TrackingNotActive.to_string()]);
    }
}
