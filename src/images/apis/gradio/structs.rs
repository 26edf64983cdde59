pub mod gradio_call_response;
pub mod gradio_event;
