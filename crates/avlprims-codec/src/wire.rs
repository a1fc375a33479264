use bytes::Buf;

use crate::error::{CodecError, Result};

/// Fails with `TruncatedInput` unless `buf` holds at least `needed` bytes.
///
/// `Buf::get_*` panics on short input, so every fixed-width read goes through here first.
pub(crate) fn ensure(buf: &impl Buf, needed: usize) -> Result<()> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(CodecError::TruncatedInput { needed, remaining });
    }
    Ok(())
}

pub(crate) fn read_u8(buf: &mut impl Buf) -> Result<u8> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_reports_shortfall() {
        let buf: &[u8] = &[1, 2, 3];
        assert!(ensure(&buf, 3).is_ok());
        assert_eq!(
            ensure(&buf, 4),
            Err(CodecError::TruncatedInput {
                needed: 4,
                remaining: 3
            })
        );
    }

    #[test]
    fn read_u8_advances() {
        let mut buf: &[u8] = &[7, 9];
        assert_eq!(read_u8(&mut buf).unwrap(), 7);
        assert_eq!(read_u8(&mut buf).unwrap(), 9);
        assert!(matches!(
            read_u8(&mut buf),
            Err(CodecError::TruncatedInput { needed: 1, remaining: 0 })
        ));
    }
}
