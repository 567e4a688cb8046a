//! Opaque handles crossing the host boundary.
//!
//! A token is a non-zero `u32`: the top four bits tag the kind of object it
//! names, the rest is a serial number that is never reused. A closed handle
//! therefore stays invalid forever, and a token of one kind can never be
//! mistaken for another.

use crate::error::CoreError;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

const KIND_SHIFT: u32 = 28;
const SERIAL_MASK: u32 = (1 << KIND_SHIFT) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HandleKind {
    Sink = 1,
    Document = 2,
    Font = 3,
    Annotation = 4,
    FormInfo = 5,
    FormEnvironment = 6,
}

impl HandleKind {
    fn from_tag(tag: u32) -> Option<Self> {
        Some(match tag {
            1 => HandleKind::Sink,
            2 => HandleKind::Document,
            3 => HandleKind::Font,
            4 => HandleKind::Annotation,
            5 => HandleKind::FormInfo,
            6 => HandleKind::FormEnvironment,
            _ => return None,
        })
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleKind::Sink => "sink",
            HandleKind::Document => "document",
            HandleKind::Font => "font",
            HandleKind::Annotation => "annotation",
            HandleKind::FormInfo => "form-fill info",
            HandleKind::FormEnvironment => "form-fill environment",
        };
        f.write_str(name)
    }
}

/// The raw token value handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(u32);

impl Token {
    /// The null token. Never issued.
    pub const NULL: Token = Token(0);

    pub const fn from_raw(raw: u32) -> Self {
        Token(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn kind(self) -> Option<HandleKind> {
        HandleKind::from_tag(self.0 >> KIND_SHIFT)
    }

    fn compose(kind: HandleKind, serial: u32) -> Self {
        Token((kind as u32) << KIND_SHIFT | serial)
    }
}

/// A token statically bound to one kind of object.
pub trait TypedHandle: Copy + fmt::Debug {
    const KIND: HandleKind;

    fn from_token(token: Token) -> Self;
    fn token(self) -> Token;

    fn from_raw(raw: u32) -> Self {
        Self::from_token(Token::from_raw(raw))
    }

    fn raw(self) -> u32 {
        self.token().raw()
    }

    /// `None` for the null token, so absent handles can be told apart from
    /// stale ones.
    fn non_null(raw: u32) -> Option<Self> {
        (raw != 0).then(|| Self::from_raw(raw))
    }
}

macro_rules! typed_handle {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Token);

        impl TypedHandle for $name {
            const KIND: HandleKind = HandleKind::$kind;

            fn from_token(token: Token) -> Self {
                $name(token)
            }

            fn token(self) -> Token {
                self.0
            }
        }
    };
}

typed_handle!(
    /// An open output sink.
    SinkHandle => Sink
);
typed_handle!(
    /// A loaded document.
    DocumentHandle => Document
);
typed_handle!(FontHandle => Font);
typed_handle!(AnnotationHandle => Annotation);
typed_handle!(FormInfoHandle => FormInfo);
typed_handle!(FormEnvHandle => FormEnvironment);

/// Objects of one kind, addressed by typed handles.
#[derive(Debug)]
pub struct HandleTable<H, T> {
    next_serial: u32,
    entries: HashMap<u32, T>,
    _handle: PhantomData<H>,
}

impl<H: TypedHandle, T> Default for HandleTable<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: TypedHandle, T> HandleTable<H, T> {
    pub fn new() -> Self {
        Self {
            next_serial: 1,
            entries: HashMap::new(),
            _handle: PhantomData,
        }
    }

    /// Takes ownership of `value` and issues a fresh handle for it.
    pub fn insert(&mut self, value: T) -> Result<H, CoreError> {
        let serial = self.next_serial;
        if serial > SERIAL_MASK {
            return Err(CoreError::HandleSpaceExhausted { kind: H::KIND });
        }
        self.next_serial += 1;
        self.entries.insert(serial, value);
        let handle = H::from_token(Token::compose(H::KIND, serial));
        log::debug!("opened {} handle {:#010x}", H::KIND, handle.raw());
        Ok(handle)
    }

    fn serial(handle: H) -> Result<u32, CoreError> {
        let token = handle.token();
        if token.kind() != Some(H::KIND) {
            return Err(CoreError::InvalidHandle {
                kind: H::KIND,
                raw: token.raw(),
            });
        }
        Ok(token.raw() & SERIAL_MASK)
    }

    fn invalid(handle: H) -> CoreError {
        CoreError::InvalidHandle {
            kind: H::KIND,
            raw: handle.raw(),
        }
    }

    pub fn get(&self, handle: H) -> Result<&T, CoreError> {
        self.entries.get(&Self::serial(handle)?).ok_or_else(|| Self::invalid(handle))
    }

    pub fn get_mut(&mut self, handle: H) -> Result<&mut T, CoreError> {
        self.entries.get_mut(&Self::serial(handle)?).ok_or_else(|| Self::invalid(handle))
    }

    /// Removes the entry, handing ownership back. The handle is dead afterwards.
    pub fn remove(&mut self, handle: H) -> Result<T, CoreError> {
        let value = self
            .entries
            .remove(&Self::serial(handle)?)
            .ok_or_else(|| Self::invalid(handle))?;
        log::debug!("closed {} handle {:#010x}", H::KIND, handle.raw());
        Ok(value)
    }

    /// The handle of an entry matching `pred`, if there is one.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<H> {
        self.entries
            .iter()
            .find(|(_, value)| pred(value))
            .map(|(&serial, _)| H::from_token(Token::compose(H::KIND, serial)))
    }

    /// Drops every entry for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|_, value| keep(value));
    }

    pub fn contains(&self, handle: H) -> bool {
        self.get(handle).is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
