use crate::data_structures::BitFlag;

#[test]
pub fn mask_queries() {
	let flag = BitFlag::from(0b1011);

	assert!(flag.is(0b1011), "Exact match failed");
	assert!(!flag.is(0b0011), "Subset reported as exact match");
	assert!(flag.has(0b0011), "Subset not contained");
	assert!(!flag.has(0b0111), "Non-subset reported as contained");
	assert!(flag.has_any(0b0110), "Intersection not detected");
	assert!(!flag.has_any(0b0100), "Disjoint mask reported as intersecting");
	assert!(flag.has(0), "Empty mask must always be contained");
}

#[test]
pub fn add_and_remove() {
	let mut flag = BitFlag::new();
	assert!(flag.is_empty(), "New flag is not empty");

	flag.add(0b0101);
	flag.add(0b0100);
	assert_eq!(flag.features(), 0b0101, "Adding a set bit changed the mask");

	flag.remove(0b0001);
	flag.remove(0b1000);
	assert_eq!(flag.features(), 0b0100, "Removing changed unrelated bits");
}

#[test]
pub fn set_bit_indices() {
	let flag = BitFlag::from((1 << 0) | (1 << 5) | (1 << 63));
	let iter = flag.iter_indices();

	assert_eq!(iter.len(), 3, "Iterator length does not match the set bit count");
	assert_eq!(iter.collect::<Vec<_>>(), vec![0, 5, 63], "Set bits not reported lowest first");
}

#[test]
pub fn operators() {
	let a = BitFlag::from(0b0011);
	let b = BitFlag::from(0b0110);

	assert_eq!((a | b).features(), 0b0111);
	assert_eq!((a & b).features(), 0b0010);
	assert_eq!(u64::from(a), 0b0011);
	assert_eq!(format!("{:?}", a), "BitFlag(0x0000000000000003)");
}
