//! Custom select widget.
//!
//! Enhances native `select` elements carrying a marker attribute with a
//! styleable replacement subtree, and keeps the two in sync as the user
//! clicks, tabs away, presses arrow keys or types to search.

pub mod bootstrap;
pub mod config;
pub mod interaction;
pub mod option;
pub mod page;
pub mod select;
pub mod type_ahead;
pub mod viewport;

pub use bootstrap::{enhance_all, BootstrapReport};
pub use config::{ClassNames, SelectConfig};
pub use interaction::{KeyAction, ListenerTarget, SelectListener};
pub use option::SelectOption;
pub use page::{Page, TimerTask, WidgetId};
pub use select::{Select, Visibility};
pub use type_ahead::TypeAhead;
pub use viewport::ListViewport;

pub use common::{SelectError, SelectResult};
