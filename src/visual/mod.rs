//! Visual verification: frame metrics and acceptance criteria

pub mod criteria;
pub mod metrics;

pub use criteria::{check_frame, frame_report, FrameCriteria};
pub use metrics::{analyze_frame, FrameAnalyzer, FrameMetrics};
