#[cfg(test)]
pub mod test_helpers {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc::{self, Receiver};
    use std::time::{Duration, Instant};

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::App;
    use crate::candidate::{Candidate, CandidateField};
    use crate::config::Config;
    use crate::source::FetchResponse;
    use crate::suggest::debouncer::DEFAULT_DEBOUNCE_MS;
    use crate::suggest::{
        Effect, FieldBindings, FormFields, SuggestMsg, SuggestWidget, WidgetHandles,
        WidgetOptions,
    };

    pub fn medication_host() -> FormFields {
        FormFields::new()
            .with_field("search", "")
            .with_field("dropdown", "")
            .with_field("dosage", "")
            .with_field("frequency", "")
            .with_field("notes", "")
    }

    pub fn test_widget() -> SuggestWidget {
        SuggestWidget::new(
            WidgetHandles::new("search", "dropdown"),
            FieldBindings::empty()
                .bind(CandidateField::Dosage, "dosage")
                .bind(CandidateField::Frequency, "frequency")
                .bind(CandidateField::Notes, "notes"),
            WidgetOptions::default(),
        )
    }

    /// Widget that has issued a query for `query` and is awaiting its response
    pub fn widget_awaiting(query: &str) -> (SuggestWidget, FormFields, u64) {
        let mut widget = test_widget();
        let mut host = medication_host();
        let now = Instant::now();
        widget.update(SuggestMsg::InputChanged(query.to_string()), &mut host, now);
        let seq = widget
            .tick(now + Duration::from_millis(widget.options().debounce_ms))
            .into_iter()
            .find_map(|e| match e {
                Effect::Fetch(req) => Some(req.seq),
                _ => None,
            })
            .unwrap_or_default();
        (widget, host, seq)
    }

    /// Widget showing `candidates` for the query "ib"
    pub fn widget_with_results(candidates: Vec<Candidate>) -> (SuggestWidget, FormFields) {
        let (mut widget, mut host, seq) = widget_awaiting("ib");
        widget.update(
            SuggestMsg::ResponseReceived { seq, candidates },
            &mut host,
            Instant::now(),
        );
        (widget, host)
    }

    pub fn test_app() -> App {
        App::new(&Config::default(), None)
    }

    pub fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)), now);
        }
    }

    /// Answer the app's in-flight query with `candidates`
    pub fn respond(app: &mut App, candidates: Vec<Candidate>, now: Instant) {
        let seq = app
            .suggest
            .as_ref()
            .and_then(SuggestWidget::in_flight_seq)
            .expect("no query in flight");
        app.handle_fetch_response(FetchResponse::Loaded { seq, candidates }, now);
    }

    /// App with "ib" typed into the search input and `candidates` in the dropdown
    ///
    /// Returns the instant the response arrived.
    pub fn app_with_results(candidates: Vec<Candidate>) -> (App, Instant) {
        let mut app = test_app();
        let start = Instant::now();
        type_text(&mut app, "ib", start);
        let now = start + Duration::from_millis(DEFAULT_DEBOUNCE_MS);
        app.tick(now);
        respond(&mut app, candidates, now);
        (app, now)
    }

    pub fn render_app(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().to_string()
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    /// Serve one canned HTTP response on a local port
    ///
    /// Returns the endpoint URL and a receiver that yields the request line
    /// once the response has been written.
    pub fn serve_once(status: &str, body: &str) -> (String, Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap_or(0) == 0 || header == "\r\n" {
                        break;
                    }
                }
                stream.write_all(response.as_bytes()).unwrap();
                let _ = tx.send(request_line);
            }
        });

        (format!("http://{}/api/medication-suggestions", addr), rx)
    }

    /// Endpoint that accepts connections but never answers
    ///
    /// Keep the returned listener alive for as long as the endpoint is used.
    pub fn silent_endpoint() -> (String, TcpListener) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        (format!("http://{}/api/medication-suggestions", addr), listener)
    }
}
