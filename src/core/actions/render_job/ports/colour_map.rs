use crate::core::data::colour::Colour;

/// Total mapping from a computed value to a colour.
pub trait ColourMap<T> {
    fn map(&self, value: &T) -> Colour;

    fn display_name(&self) -> &str;
}
