pub mod artifact_kind;
