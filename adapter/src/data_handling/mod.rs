pub mod hgnc;
pub mod phenopacket;
