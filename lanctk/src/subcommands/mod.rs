/// Ancestry dosages to a BGZF dosage store with .psam and .pvar companions
pub mod to_dosage;

/// Ancestry dosages to a labeled variants x samples array
pub mod to_array;

/// Local ancestry disequilibrium matrix from a genetic map
pub mod lad_matrix;

/// Fill the genetic position column of a PLINK .bim file
pub mod annotate_bim;

/// Shortcuts to list the populations and samples of a table
pub mod list_table;
