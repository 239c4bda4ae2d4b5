pub(crate) mod element;
pub(crate) mod format;

#[cfg(test)]
#[path = "../../tests/unit/pixel/element.rs"]
mod tests;
