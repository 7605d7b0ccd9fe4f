pub mod inspect_model;
