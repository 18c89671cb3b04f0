/// multicomponent transport of hydrogen-nitrogen and humid air mixtures
pub mod transport_examples;
