mod describe;
mod graph_backward;
mod graph_basic;
