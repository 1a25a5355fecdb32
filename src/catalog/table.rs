//! The canonical operation table.
//!
//! Order is load-bearing: a new operation is inserted into a section in front
//! of the first existing operation that sits at or after it in this list.
//! Entries starting with `Cascade-` open a cascade; every name below a marker
//! belongs to that cascade until the next marker.

pub const CASCADE_PREFIX: &str = "Cascade-";

pub const OPERATION_TABLE: &[&str] = &[
    "Cascade-Simulate",
    "GEN",
    "SIM",
    "Cascade-FID",
    "DCFID",
    "COADD",
    "SCALE",
    "SHIFT",
    "CSHIFT",
    "TDCOMB",
    "ADD",
    "ONES",
    "ZEROS",
    "Cascade-TD-Solvent",
    "TDSS",
    "SUPPRESS",
    "Cascade-Sampling",
    "EXTEND",
    "LP",
    "LPR",
    "SAMPLE_SCHEDULE",
    "NESTA",
    "IST",
    "GRINS",
    "Cascade-Apodization",
    "APODIZE",
    "BLACKMAN",
    "EXPD",
    "GM",
    "GMB",
    "KAISER",
    "SB",
    "SINEBELL",
    "TM",
    "TRI",
    "Cascade-Transform",
    "ZF",
    "FT",
    "RFT",
    "HFT",
    "IFT",
    "REAL",
    "IMAG",
    "MAG",
    "POWER",
    "REVERSE",
    "Cascade-FD-Solvent",
    "FDSS",
    "Cascade-Phasing",
    "PHASE",
    "PHASEND",
    "AUTOPHASE",
    "Cascade-Baseline",
    "BCWHIT",
    "BCPOLY",
    "BCSINE",
    "BCMED",
    "BCAUTO",
    "Cascade-Regions",
    "REGIONS",
    "AUTOREGIONS",
    "EXTRACT",
    "Cascade-Measure",
    "MEASURE",
    "INTEGRATE",
    "NORM",
    "Cascade-Dataset",
    "TRIM",
    "MERGE",
    "DEPT",
    "WRITE",
    "Cascade-New",
    "SIGN",
    "RANDN",
];

/// Members of the non-uniform-sampling reconstruction cascade. These live in
/// the Sampling cascade of the table but group together on their own.
pub const NUS_MEMBERS: &[&str] = &["NESTA", "IST", "GRINS"];

/// Reference/acquisition properties that may appear before the first `DIM`.
pub const HEADER_PROPERTIES: &[&str] = &[
    "skip", "sw", "sf", "ref", "label", "acqOrder", "acqarray", "acqmode", "acqsize", "tdsize",
    "fixdsp",
];
