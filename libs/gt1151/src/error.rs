use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<E> {
    #[error("I2C error: {0:?}")]
    I2c(E),
    #[error("Unexpected product ID: {0:02x?}")]
    ProductId([u8; 4]),
}

impl<E> From<E> for Error<E>
where
    E: embedded_hal::i2c::Error,
{
    fn from(error: E) -> Self {
        Error::I2c(error)
    }
}
