//! # spark-gui
//!
//! Retained-mode terminal GUI core.
//!
//! ## Architecture
//!
//! Components live in an arena ([`engine::ComponentTree`]) and are addressed
//! by [`ComponentId`]. Containers own an ordered child list and a layout
//! policy; borders wrap one child; interactables can take focus. A
//! [`pane::BasePane`] roots one hierarchy and owns focus. A [`gui::TextGui`]
//! ties a pane to a [`screen::Screen`], and a GUI thread drives it:
//!
//! ```text
//! Screen input → BasePane → focused interactable → (unhandled) → GUI listeners
//! Tree change → invalidation → pane invalid → layout → draw → diff → Screen
//! ```
//!
//! ## Modules
//!
//! - [`types`] - positions, sizes, colors, cells
//! - [`engine`] - component arena, containers, borders, widgets
//! - [`layout`] - linear, absolute and flex (taffy) layout policies
//! - [`state`] - key strokes, focus directions, interactable lookup map
//! - [`pane`] - the base pane: focus, input routing, invalidation
//! - [`renderer`] - frame buffer, clipped drawing, diff rendering
//! - [`screen`] - the screen contract, crossterm and in-memory backends
//! - [`theme`] - per-component-type styles and characters
//! - [`gui`] - the event loop in cooperative and dedicated-thread models

pub mod engine;
pub mod error;
pub mod gui;
pub mod layout;
pub mod pane;
pub mod renderer;
pub mod screen;
pub mod state;
pub mod theme;
pub mod types;

pub use types::*;

pub use error::{GuiError, Result};

pub use engine::{
    BorderRenderer, ComponentId, ComponentTree, DrawContext, EmptySpace, InputFilter, LineBorder,
    LineStyle, SpacerBorder, Widget,
};

pub use layout::{
    AbsoluteLayout, Alignment, FlexItem, FlexLayout, GrowPolicy, LayoutData, LayoutManager,
    LinearLayout, LinearLayoutData,
};

pub use state::{
    FocusChangeDirection, FocusDirection, InputResult, InteractableLookupMap, Key, KeyStroke,
    Modifiers,
};

pub use pane::{BasePane, BasePaneListener, InputDelivery, ListenerId, Propagation};

pub use renderer::{DiffRenderer, FrameBuffer, TextGraphics};

pub use screen::{Screen, TerminalScreen, VirtualScreen};

pub use theme::{Theme, ThemeColor, ThemeDefinition, ThemeStyle};

pub use gui::{
    ActionSender, ErrorPolicy, ExceptionHandler, GuiThreadConfig, GuiThreadState, LogAndContinue,
    SameTextGuiThread, SeparateTextGuiThread, TextGui, TextGuiListener, TextGuiThread,
    WaitInterrupter,
};
