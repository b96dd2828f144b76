pub mod dijkstra;
pub mod heap;
pub mod yens;
