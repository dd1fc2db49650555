//! Page arithmetic for the grid

/// Pagination state of one render pass
///
/// The page is clamped into the valid range once the item count is known, so
/// a stale page number from an earlier request lands on the last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
	page: usize,
	items_per_page: usize,
	item_count: usize,
}

impl Paginator {
	/// Creates a paginator on the first page
	///
	/// A zero page size is treated as one.
	pub fn new(items_per_page: usize) -> Self {
		Self {
			page: 1,
			items_per_page: items_per_page.max(1),
			item_count: 0,
		}
	}

	/// Requests a one-based page
	pub fn set_page(&mut self, page: usize) {
		self.page = page.max(1);
	}

	/// Sets the number of matching items
	pub fn set_item_count(&mut self, item_count: usize) {
		self.item_count = item_count;
	}

	/// Current page, clamped into `1..=last_page`
	pub fn page(&self) -> usize {
		self.page.clamp(1, self.last_page())
	}

	/// Rows per page
	pub fn items_per_page(&self) -> usize {
		self.items_per_page
	}

	/// Number of matching items
	pub fn item_count(&self) -> usize {
		self.item_count
	}

	/// Number of pages; zero when there are no items
	pub fn page_count(&self) -> usize {
		self.item_count.div_ceil(self.items_per_page)
	}

	/// Last page number, at least 1
	pub fn last_page(&self) -> usize {
		self.page_count().max(1)
	}

	/// Whether the current page is the first one
	pub fn is_first(&self) -> bool {
		self.page() == 1
	}

	/// Whether the current page is the last one
	pub fn is_last(&self) -> bool {
		self.page() == self.last_page()
	}

	/// Zero-based index of the first row on the current page
	pub fn offset(&self) -> usize {
		(self.page() - 1) * self.items_per_page
	}

	/// Number of rows on the current page
	pub fn length(&self) -> usize {
		self.item_count
			.saturating_sub(self.offset())
			.min(self.items_per_page)
	}

	/// Page numbers worth linking: `surround` pages either side of the
	/// current one, the first and last page, and `quotients` evenly spread
	/// pages in between
	pub fn steps(&self, surround: usize, quotients: usize) -> Vec<usize> {
		let last = self.last_page();
		let page = self.page();
		let mut steps: Vec<usize> =
			(page.saturating_sub(surround).max(1)..=(page + surround).min(last)).collect();
		steps.push(1);
		steps.push(last);
		if quotients > 0 && last > 1 {
			let quotient = (last - 1) as f64 / quotients as f64;
			steps.extend((0..=quotients).map(|i| (quotient * i as f64).round() as usize + 1));
		}
		steps.sort_unstable();
		steps.dedup();
		steps
	}
}
