use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

macro_rules! periodic_table {
    ($($element:ident),+ $(,)?) => {
        /// Chemical element, indexed by atomic number.
        ///
        /// [`Element::Du`] (atomic number 0) is the dummy atom that marks the
        /// attachment point left behind when a bond is cut.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Element {
            Du = 0,
            $($element),+
        }

        impl Element {
            /// Every element in atomic-number order, dummy first.
            pub const ALL: &'static [Element] = &[Element::Du, $(Element::$element),+];

            /// Symbol as written in structure files; the dummy is `*`.
            pub fn symbol(&self) -> &'static str {
                match self {
                    Element::Du => "*",
                    $(Element::$element => stringify!($element)),+
                }
            }
        }
    };
}

#[rustfmt::skip]
periodic_table!(
    H,                                                                  He,
    Li, Be,                                         B,  C,  N,  O,  F,  Ne,
    Na, Mg,                                         Al, Si, P,  S,  Cl, Ar,
    K,  Ca, Sc, Ti, V,  Cr, Mn, Fe, Co, Ni, Cu, Zn, Ga, Ge, As, Se, Br, Kr,
    Rb, Sr, Y,  Zr, Nb, Mo, Tc, Ru, Rh, Pd, Ag, Cd, In, Sn, Sb, Te, I,  Xe,
    Cs, Ba,
        La, Ce, Pr, Nd, Pm, Sm, Eu, Gd, Tb, Dy, Ho, Er, Tm, Yb, Lu,
            Hf, Ta, W,  Re, Os, Ir, Pt, Au, Hg, Tl, Pb, Bi, Po, At, Rn,
    Fr, Ra,
        Ac, Th, Pa, U,  Np, Pu, Am, Cm, Bk, Cf, Es, Fm, Md, No, Lr,
            Rf, Db, Sg, Bh, Hs, Mt, Ds, Rg, Cn, Nh, Fl, Mc, Lv, Ts, Og,
);

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    #[inline]
    pub fn is_dummy(&self) -> bool {
        *self == Element::Du
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        *self == Element::H
    }

    /// Heavy atoms are everything above hydrogen; dummies do not count.
    #[inline]
    pub fn is_heavy(&self) -> bool {
        self.atomic_number() > 1
    }

    /// Single-bond covalent radius in Ångströms, used for bond perception.
    pub fn covalent_radius(&self) -> f64 {
        match self {
            Element::Du => 0.0,
            Element::H => 0.31,
            Element::B => 0.84,
            Element::C => 0.76,
            Element::N => 0.71,
            Element::O => 0.66,
            Element::F => 0.57,
            Element::Na => 1.66,
            Element::Mg => 1.41,
            Element::Si => 1.11,
            Element::P => 1.07,
            Element::S => 1.05,
            Element::Cl => 1.02,
            Element::K => 2.03,
            Element::Ca => 1.76,
            Element::Mn => 1.39,
            Element::Fe => 1.32,
            Element::Co => 1.26,
            Element::Ni => 1.24,
            Element::Cu => 1.32,
            Element::Zn => 1.22,
            Element::Se => 1.20,
            Element::Br => 1.20,
            Element::I => 1.39,
            _ => 1.50,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    /// Exact, case-sensitive symbol match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .iter()
            .copied()
            .find(|e| e.symbol() == s)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    pub fn value(&self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
            BondOrder::Aromatic => write!(f, "Aromatic"),
        }
    }
}
