mod dataset;
mod loader;

pub use dataset::SplitData;
pub use loader::{load_matrix, read_matrix, split_features_labels, train_test_split};
