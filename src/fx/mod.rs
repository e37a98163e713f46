//! Target-independent state and math behind each page effect.
//!
//! Nothing in here touches the DOM, so every piece is unit tested on the
//! host. The `frontend` module feeds browser measurements in and writes the
//! results back out as classes and inline styles.

pub mod contact;
pub mod particles;
pub mod pointer;
pub mod reveal;
pub mod scroll;
pub mod smooth_scroll;
pub mod theme;
