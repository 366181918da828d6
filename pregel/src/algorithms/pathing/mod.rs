pub mod single_source_shortest_path;
