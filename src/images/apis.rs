pub mod gradio;
pub mod predictor;
