// LANCTK - Local ancestry toolkit
// Copyright (C) 2024  The LANCTK contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
//
//

//! LANCTK - Local ancestry toolkit
//!
//! This library and program converts RFMix local ancestry calls into dosage matrices usable
//! by downstream association tools, and builds local ancestry LD (LAD) matrices from a
//! genetic map.
//!
//! For navigating the documentation of the available modules, see [the `Modules` section below](#modules).
//!
//! LANCTK toolkit commands
//!
//! * Convert the forward-backward probabilities of one ancestry into a PLINK 2 style dosage store
//! * Convert the forward-backward probabilities of one ancestry into a labeled 2D array
//! * Compute the LAD matrix of a set of markers given the generations since admixture
//! * Fill the genetic distance column of a PLINK .bim file
//! * List the populations and samples of a forward-backward table
//!
//! # Getting started
//!
//! ## Installing LANCTK
//!
//! Rust and its package manager cargo can be installed following the instruction for [rustup](https://rustup.rs/).
//!
//! After installing cargo, run the following command
//!
//! ```bash
//! cargo install --path lanctk
//! ```
//!
//! ## Running LANCTK
//!
//! To print the available commands use:
//! ```bash
//! lanctk --help
//! ```
//!
//! A typical run over one chromosome:
//! ```bash
//!lanctk populations chr22.fb.tsv
//!
//!lanctk to-dosage chr22.fb.tsv --pop AFR -o ${outdir} -p chr22_AFR
//!
//!lanctk to-array chr22.fb.tsv --pop AFR -o ${outdir} -p chr22_AFR
//!
//!lanctk lad-matrix --cm-map chr22.map --extract chr22.targets --generations 8 -o ${outdir} -p chr22
//!
//!lanctk annotate-bim chr22.bim --cm-map chr22.map -o ${outdir}/chr22_cm.bim
//!```
//!

#[doc(hidden)]
pub mod args;

#[doc(hidden)]
pub mod io;

/// Streaming reader for RFMix forward-backward tables
pub mod fb_table;

/// Genetic map loading and centimorgan interpolation
pub mod genetic_map;

/// LANCTK structs
pub mod structs;

#[doc(hidden)]
pub mod utils;

#[doc(hidden)]
pub mod error;

#[cfg(feature = "clap")]
pub mod clap;
