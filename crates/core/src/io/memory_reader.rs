use crate::error::{CoreError, CoreResult};

/// Reads little-endian values out of a borrowed byte slice.
pub struct MemoryReader<'a> {
    memory: &'a [u8],
    pos: usize,
}

impl<'a> MemoryReader<'a> {
    pub fn new(memory: &'a [u8]) -> Self {
        Self { memory, pos: 0 }
    }

    #[inline(always)]
    fn ensure_position(&self, move_by: usize) -> CoreResult<()> {
        if self.pos + move_by > self.memory.len() {
            Err(CoreError::decode(format!(
                "unexpected end of data at offset {} (need {move_by} bytes)",
                self.pos
            )))
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.memory.len()
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.memory.len().saturating_sub(self.pos)
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> CoreResult<u8> {
        self.ensure_position(1)?;
        let value = self.memory[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> CoreResult<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_u32(&mut self) -> CoreResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_u64(&mut self) -> CoreResult<u64> {
        let bytes = self.read_array::<8>()?;
        Ok(u64::from_le_bytes(bytes))
    }

    pub fn read_array<const N: usize>(&mut self) -> CoreResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_bytes(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        self.ensure_position(count)?;
        let slice = &self.memory[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Reads a variable-length integer no larger than `max`.
    pub fn read_var_int(&mut self, max: u64) -> CoreResult<u64> {
        let value = match self.read_u8()? {
            0xFD => u64::from(self.read_u16()?),
            0xFE => u64::from(self.read_u32()?),
            0xFF => self.read_u64()?,
            small => u64::from(small),
        };
        if value > max {
            return Err(CoreError::decode(format!(
                "length {value} exceeds maximum {max}"
            )));
        }
        Ok(value)
    }

    pub fn read_var_bytes(&mut self, max: usize) -> CoreResult<&'a [u8]> {
        let len = self.read_var_int(max as u64)? as usize;
        self.read_bytes(len)
    }
}
