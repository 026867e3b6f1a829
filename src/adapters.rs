pub mod smartlead;

pub use smartlead::SmartleadClient;
