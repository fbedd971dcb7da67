pub type Result<T, SINKER> = core::result::Result<T, Error<SINKER>>;

#[derive(Debug, PartialEq, Eq)]
pub enum Error<SINK> {
    // Display sink error
    Sink(SINK),
    // Text did not fit the formatting buffer
    BufferWrite,
    // Fewer readings than the analysis needs
    NotEnoughSamples,
}
