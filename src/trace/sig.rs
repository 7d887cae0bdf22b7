use std::rc::Rc;

/// Function signature interned on first occurrence.
#[derive(Debug)]
pub struct FunctionSig {
	/// Writer-assigned signature id.
	pub id: u32,
	/// Function name.
	pub name: Box<str>,
	/// Declared argument names, in positional order.
	pub arg_names: Vec<Box<str>>,
	/// Stream offset just past the descriptor at its defining site.
	pub offset: u64,
}

/// Struct signature interned on first occurrence.
#[derive(Debug)]
pub struct StructSig {
	/// Writer-assigned signature id.
	pub id: u32,
	/// Struct type name.
	pub name: Box<str>,
	/// Declared member names, in order.
	pub member_names: Vec<Box<str>>,
	/// Stream offset just past the descriptor at its defining site.
	pub offset: u64,
}

/// One named enum constant. Writers emit one signature per symbol.
#[derive(Debug)]
pub struct EnumSig {
	/// Writer-assigned signature id.
	pub id: u32,
	/// Constant name.
	pub name: Box<str>,
	/// Constant value.
	pub value: i64,
	/// Stream offset just past the descriptor at its defining site.
	pub offset: u64,
}

/// One named bitmask flag.
#[derive(Debug)]
pub struct BitmaskFlag {
	/// Flag name.
	pub name: Box<str>,
	/// Flag bits; zero only for a leading "no bits" flag.
	pub value: u64,
}

/// Bitmask signature interned on first occurrence.
#[derive(Debug)]
pub struct BitmaskSig {
	/// Writer-assigned signature id.
	pub id: u32,
	/// Declared flags, in order.
	pub flags: Vec<BitmaskFlag>,
	/// Stream offset just past the descriptor at its defining site.
	pub offset: u64,
}

/// Interning table keyed by writer-assigned id.
///
/// Installed entries never move; values keep `Rc` clones, so a signature
/// outlives every value that references it.
#[derive(Debug)]
pub(crate) struct SigTable<T> {
	slots: Vec<Option<Rc<T>>>,
}

impl<T> Default for SigTable<T> {
	fn default() -> Self {
		Self { slots: Vec::new() }
	}
}

impl<T> SigTable<T> {
	/// Fetch the entry at `id`, growing the table when `id` is new.
	pub fn lookup(&mut self, id: u32) -> Option<Rc<T>> {
		let index = id as usize;
		if index >= self.slots.len() {
			self.slots.resize(index + 1, None);
			return None;
		}
		self.slots[index].clone()
	}

	/// Install a freshly parsed signature. The slot must exist from `lookup`.
	pub fn install(&mut self, id: u32, sig: Rc<T>) {
		self.slots[id as usize] = Some(sig);
	}
}
