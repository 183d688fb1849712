//! Pure transforms between backend payloads and what a front end renders:
//! highlighted text fragments, a bounded graph and the visible page.

pub mod graph;
pub mod highlight;
pub mod pagination;

pub use graph::{normalize, GraphDataProcessor, MAX_GRAPH_NODES};
pub use highlight::{highlight, Fragment};
pub use pagination::{page_range, paginate, PageRange, ITEMS_PER_PAGE};
