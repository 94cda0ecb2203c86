pub mod writer;

pub use writer::LeadStore;
