/// Core data-model structures: [`Node`], [`Edge`], and [`PositionedNode`].
///
/// Nodes and edges are the logical representation produced by the scanners;
/// a [`PositionedNode`] is the positioned/decorated variant the layout engine
/// returns. Both variants feed the same canonical graph builder (see
/// [`crate::graph::build_graph`]).
mod edge;
mod node;
mod positioned;

pub use edge::Edge;
pub use node::Node;
pub use positioned::PositionedNode;
