pub mod labels;

pub use labels::{
    LabelPlacementConfig, LabelRequest, LabelSeriesState, PlacedLabel, label_angle_fraction,
    labels_supported, place_labels,
};
