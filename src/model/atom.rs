use super::types::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub position: [f64; 3],
    pub formal_charge: i8,
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self {
            element,
            position,
            formal_charge: 0,
        }
    }

    /// Attachment placeholder (atomic number 0) at `position`.
    pub fn dummy(position: [f64; 3]) -> Self {
        Self::new(Element::Du, position)
    }

    pub fn with_charge(mut self, formal_charge: i8) -> Self {
        self.formal_charge = formal_charge;
        self
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        self.element.atomic_number()
    }
}
