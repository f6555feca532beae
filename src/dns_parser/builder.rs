use std::marker::PhantomData;

use super::bytes::encode_u16;
use super::{Class, Header, Name, Opcode, ResponseCode, Type};
#[cfg(test)]
use super::{bytes::encode_u32, RRData};

pub enum Questions {}
#[cfg(test)]
pub enum Answers {}
#[cfg(test)]
pub enum Nameservers {}
#[cfg(test)]
pub enum Additional {}

pub trait MoveTo<T> {}
impl<T> MoveTo<T> for T {}


/// Classic UDP payload limit
pub const MAX_UDP_SIZE: usize = 512;

/// Writes a DNS message section by section
///
/// Sections are filled in wire order. The type parameter names the section
/// currently being written, so a question can't follow an answer. Outside of
/// tests only the question section exists, which is all a query carries.
pub struct Builder<S> {
    buf: Vec<u8>,
    max_size: Option<usize>,
    _state: PhantomData<S>,
}

impl Builder<Questions> {
    /// Starts a standard query with empty sections
    pub fn new_query(id: u16, recursion: bool) -> Builder<Questions> {
        Builder::with_header(Header {
            id,
            query: true,
            opcode: Opcode::StandardQuery,
            authoritative: false,
            truncated: false,
            recursion_desired: recursion,
            recursion_available: false,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        })
    }

    #[cfg(test)]
    pub fn new_response(id: u16, recursion: bool, authoritative: bool) -> Builder<Questions> {
        Builder::with_header(Header {
            id,
            query: false,
            opcode: Opcode::StandardQuery,
            authoritative,
            truncated: false,
            recursion_desired: recursion,
            recursion_available: recursion,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        })
    }

    fn with_header(head: Header) -> Builder<Questions> {
        let mut buf = vec![0u8; Header::size()];
        head.write(&mut buf);
        Builder {
            buf,
            max_size: Some(MAX_UDP_SIZE),
            _state: PhantomData,
        }
    }
}

impl<T> Builder<T> {
    /// Returns the finished message
    ///
    /// A message longer than the size limit gets its truncation bit set and
    /// comes back as `Err`; it is complete and valid either way.
    pub fn build(mut self) -> Result<Vec<u8>, Vec<u8>> {
        match self.max_size {
            Some(max_size) if self.buf.len() > max_size => {
                Header::set_truncated(&mut self.buf[..Header::size()]);
                Err(self.buf)
            }
            _ => Ok(self.buf),
        }
    }

    pub fn move_to<U>(self) -> Builder<U>
    where
        T: MoveTo<U>,
    {
        Builder {
            buf: self.buf,
            max_size: self.max_size,
            _state: PhantomData,
        }
    }

    /// Appends a name followed by its type and class codes
    fn write_entry(&mut self, name: &Name, typ: Type, cls: Class) {
        name.write_to(&mut self.buf)
            .unwrap_or_else(|_| unreachable!("writing to a Vec can't fail"));
        self.buf.extend_from_slice(&encode_u16(typ.code()));
        self.buf.extend_from_slice(&encode_u16(cls.code()));
    }
}

#[cfg(test)]
impl<T> Builder<T> {
    fn write_rr(&mut self, name: &Name, cls: Class, ttl: u32, data: &RRData) {
        self.write_entry(name, data.typ(), cls);
        self.buf.extend_from_slice(&encode_u32(ttl));

        let size_offset = self.buf.len();
        self.buf.extend_from_slice(&[0, 0]);
        data.write_to(&mut self.buf).unwrap();
        let data_size = self.buf.len() - size_offset - 2;
        self.buf[size_offset..size_offset + 2].copy_from_slice(&encode_u16(data_size as u16));
    }

    pub fn set_max_size(&mut self, max_size: Option<usize>) {
        self.max_size = max_size;
    }

    pub fn is_empty(&self) -> bool {
        self.buf.len() == Header::size()
    }
}

impl<T: MoveTo<Questions>> Builder<T> {
    /// Adds a question to the packet
    ///
    /// # Panics
    ///
    /// * There are already 65535 questions in the buffer.
    pub fn add_question(self, qname: &Name, qtype: Type, qclass: Class) -> Builder<Questions> {
        let mut builder = self.move_to::<Questions>();

        builder.write_entry(qname, qtype, qclass);
        Header::inc_questions(&mut builder.buf).expect("Too many questions");
        builder
    }
}

#[cfg(test)]
impl<T: MoveTo<Answers>> Builder<T> {
    pub fn add_answer(self, name: &Name, cls: Class, ttl: u32, data: &RRData) -> Builder<Answers> {
        let mut builder = self.move_to::<Answers>();

        builder.write_rr(name, cls, ttl, data);
        Header::inc_answers(&mut builder.buf).expect("Too many answers");

        builder
    }
}

#[cfg(test)]
impl<T: MoveTo<Nameservers>> Builder<T> {
    pub fn add_nameserver(
        self,
        name: &Name,
        cls: Class,
        ttl: u32,
        data: &RRData,
    ) -> Builder<Nameservers> {
        let mut builder = self.move_to::<Nameservers>();

        builder.write_rr(name, cls, ttl, data);
        Header::inc_nameservers(&mut builder.buf).expect("Too many nameservers");

        builder
    }
}

#[cfg(test)]
impl<T: MoveTo<Additional>> Builder<T> {
    pub fn add_additional(
        self,
        name: &Name,
        cls: Class,
        ttl: u32,
        data: &RRData,
    ) -> Builder<Additional> {
        let mut builder = self.move_to::<Additional>();

        builder.write_rr(name, cls, ttl, data);
        Header::inc_additional(&mut builder.buf).expect("Too many additional answers");

        builder
    }
}
