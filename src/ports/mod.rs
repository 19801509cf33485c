/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) are the interfaces the use cases need from
/// the file system, the console and the async runtime.
pub mod outbound;
