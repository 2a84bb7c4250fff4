pub mod interval;
pub mod roster;
pub mod schedule;

pub use interval::{
  IntervalDefinition, IntervalSegment, MetricTargets, PrimaryMetric, SegmentKind, SetConfiguration,
};
pub use roster::{HealthStatus, Participant, PositionBucket, Team};
pub use schedule::{
  RotationGroup, RotationSchedule, ScheduleStrategy, SessionTiming, ValidationReport,
};
