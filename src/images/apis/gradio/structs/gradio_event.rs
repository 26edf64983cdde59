/// One server-sent event from a Gradio call stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradioEvent {
    pub event: String,
    pub data: String,
}

#[non_exhaustive]
pub struct GradioEventType;

impl GradioEventType {
    pub const COMPLETE: &'static str = "complete";
    pub const ERROR: &'static str = "error";
    pub const GENERATING: &'static str = "generating";
    pub const HEARTBEAT: &'static str = "heartbeat";
}

impl GradioEvent {
    /// Parses one blank-line delimited block. Comment-only blocks yield `None`.
    pub fn parse(block: &str) -> Option<Self> {
        let mut event: Option<String> = None;
        let mut data: Vec<&str> = Vec::new();

        for line in block.lines() {
            if line.is_empty() || line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };

            match field {
                "event" => event = Some(value.to_string()),
                "data" => data.push(value),
                _ => {}
            }
        }

        if event.is_none() && data.is_empty() {
            return None;
        }

        Some(Self {
            event: event.unwrap_or_else(|| "message".to_string()),
            data: data.join("\n"),
        })
    }

    /// Pops the next complete event off the front of `buffer`. Carriage
    /// returns must already be stripped.
    pub fn take_from(buffer: &mut Vec<u8>) -> Option<Self> {
        loop {
            let end = buffer.windows(2).position(|window| window == b"\n\n")?;
            let block: Vec<u8> = buffer.drain(..end + 2).collect();

            if let Some(event) = Self::parse(&String::from_utf8_lossy(&block)) {
                return Some(event);
            }
        }
    }
}
