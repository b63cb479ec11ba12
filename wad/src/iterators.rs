use crate::RecordSizeError;
use crate::lumps::LumpRecord;
use std::marker::PhantomData;

/// Walks a lump one fixed-size record at a time
pub struct LumpIter<'a, T: LumpRecord> {
    data: &'a [u8],
    item_count: usize,
    current: usize,
    _phantom: PhantomData<T>,
}

impl<'a, T: LumpRecord> LumpIter<'a, T> {
    /// Trailing bytes that don't make up a whole record are ignored. Use
    /// `records()` to reject them instead.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            item_count: data.len() / T::SIZE,
            current: 0,
            _phantom: PhantomData,
        }
    }
}

impl<T: LumpRecord> Iterator for LumpIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.item_count {
            let offset = self.current * T::SIZE;
            let item = T::parse(&self.data[offset..offset + T::SIZE]);
            self.current += 1;
            return Some(item);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.item_count - self.current;
        (left, Some(left))
    }
}

impl<T: LumpRecord> ExactSizeIterator for LumpIter<'_, T> {}

/// Iterate the records of a lump, failing if the lump is not a whole number
/// of records long
pub fn records<T: LumpRecord>(data: &[u8]) -> Result<LumpIter<'_, T>, RecordSizeError> {
    if data.len() % T::SIZE != 0 {
        return Err(RecordSizeError {
            len: data.len(),
            record_size: T::SIZE,
        });
    }
    Ok(LumpIter::new(data))
}

#[cfg(test)]
mod tests {
    use crate::lumps::{WadSubSector, WadVertex};
    use crate::{RecordSizeError, records};

    #[test]
    fn vertex_iter() {
        let bytes: Vec<u8> = [1088i16, -3680, 2912, -4848]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let mut iter = records::<WadVertex>(&bytes).unwrap();
        assert_eq!(iter.len(), 2);

        let next = iter.next().unwrap();
        assert_eq!((next.x, next.y), (1088, -3680));
        let next = iter.next().unwrap();
        assert_eq!((next.x, next.y), (2912, -4848));
        assert!(iter.next().is_none());
    }

    #[test]
    fn ragged_lump_is_rejected() {
        let bytes = [0u8; 5];
        let err = records::<WadVertex>(&bytes).err().unwrap();
        assert_eq!(
            err,
            RecordSizeError {
                len: 5,
                record_size: 4
            }
        );
    }

    #[test]
    fn empty_lump_has_no_records() {
        assert_eq!(records::<WadSubSector>(&[]).unwrap().count(), 0);
    }
}
