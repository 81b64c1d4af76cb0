//! fieldfx renders the decorative effects of a portfolio landing page.
//!
//! - **Particle field**: a fixed population of drifting particles, linked by
//!   faint lines when close, softly attracted to the pointer, reflected at the
//!   edges of the surface.
//! - **Transcript**: a scripted terminal played back one line at a time.
//! - **Motion helpers**: stagger delays, eased anchor scrolling, count-up stats.
//!
//! Effects are host-agnostic. A host feeds [`HostEvent`]s into a
//! [`PageSession`], supplies a [`FrameScheduler`] for per-frame callbacks, and
//! a [`Surface`] to draw into. The crate ships a `vello_cpu` surface
//! ([`CpuSurface`]) and a headless [`OfflineDriver`] used by the `fieldfx` CLI
//! to write PNG frames and digests.
#![forbid(unsafe_code)]

pub mod draw;
pub mod field;
pub mod foundation;
pub mod host;
pub mod motion;
pub mod transcript;

pub use draw::cpu::CpuSurface;
pub use draw::frame::FrameRGBA;
pub use draw::surface::{DrawCmd, RecordingSurface, Surface};
pub use field::config::FieldConfig;
pub use field::particle::Particle;
pub use field::pointer::PointerState;
pub use field::renderer::{FrameStats, Link, ParticleField};
pub use foundation::core::{FrameIndex, Point, Rect, Rgba8, SurfaceSize, Vec2};
pub use foundation::error::{FxError, FxResult};
pub use host::offline::OfflineDriver;
pub use host::page::{DEFAULT_CANVAS_ID, DEFAULT_TERMINAL_ID, HostEvent, PageDom, SessionConfig};
pub use host::scheduler::{AnimationLoop, FrameRequestId, FrameScheduler, ManualScheduler};
pub use host::session::PageSession;
pub use motion::counter::CountUp;
pub use motion::ease::Ease;
pub use motion::scroll::{AnchorMap, ScrollTween};
pub use motion::stagger::{GRID_STAGGER_STEP, stagger_delays};
pub use transcript::player::{LogEntry, TerminalLog, TranscriptPlayer};
pub use transcript::script::{LineKind, Script, TranscriptLine};
