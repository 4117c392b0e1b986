pub mod config;
pub mod error;
pub mod replay;
pub mod trace;

pub use config::{CONFIG_ENV, DEFAULT_CONFIG_FILE, load_config, parse_config, render_config, resolve_config_path};
pub use error::{Result, TraceError};
pub use replay::{Replay, replay};
pub use trace::{parse_sample_line, read_trace, read_trace_file, write_gesture};
