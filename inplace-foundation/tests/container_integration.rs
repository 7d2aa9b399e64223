// Integration tests for the fixed-capacity containers
// Exercises the public API the way a firmware module would use it

use inplace_error::{codes, ErrorDetail, Result};
use inplace_foundation::{
    collections::{FixedBuffer, FixedMap, FixedStack, FixedVec, History},
    limits::{self, Map, Stack},
};

const CANARY: u64 = 0xDEAD_BEEF_CAFE_F00D;

/// A container followed by a word that a capacity overrun would clobber.
#[repr(C)]
struct Guarded<C> {
    container: C,
    canary: u64,
}

#[test]
fn test_full_containers_leave_neighbors_untouched() {
    let mut vec = Guarded { container: FixedVec::<u8, 3>::new(), canary: CANARY };
    for value in 0..10 {
        let _ = vec.container.push_back(value);
        let _ = vec.container.insert(0, value);
    }
    assert_eq!(vec.container.len(), 3);
    assert_eq!(vec.canary, CANARY);

    let mut buffer = Guarded { container: FixedBuffer::<u16, 2>::new(), canary: CANARY };
    for value in 0..10 {
        let _ = buffer.container.write(value);
    }
    assert_eq!(buffer.container.assign(&[1, 2, 3]), 0);
    assert_eq!(buffer.canary, CANARY);

    let mut map = Guarded { container: FixedMap::<u8, u32, 2>::new(), canary: CANARY };
    for key in 0..10 {
        let _ = map.container.insert(key, u32::from(key));
    }
    assert_eq!(map.container.len(), 2);
    assert_eq!(map.canary, CANARY);
}

#[test]
fn test_insert_shifts_tail() -> Result<()> {
    let mut vec = FixedVec::<char, 6>::from_slice(&['A', 'B', 'C', 'D', 'E'])?;
    vec.insert(2, 'X')?;
    assert_eq!(vec.as_slice(), &['A', 'B', 'X', 'C', 'D', 'E']);

    let err = vec.insert(0, 'Y').unwrap_err();
    assert_eq!(err.code, codes::CAPACITY_EXCEEDED);
    assert_eq!(err.detail, Some(ErrorDetail::Capacity(6)));
    assert_eq!(vec.as_slice(), &['A', 'B', 'X', 'C', 'D', 'E']);

    assert_eq!(vec.erase(2)?, 'X');
    assert_eq!(vec.as_slice(), &['A', 'B', 'C', 'D', 'E']);
    let err = vec.insert(6, 'Z').unwrap_err();
    assert_eq!(err.code, codes::INDEX_OUT_OF_BOUNDS);
    assert_eq!(err.detail, Some(ErrorDetail::Bounds { index: 6, len: 5 }));
    Ok(())
}

#[test]
fn test_buffer_write_read_round_trip() -> Result<()> {
    let mut buffer = FixedBuffer::<u32, 4>::new();
    for value in [10, 20, 30, 40] {
        buffer.write(value)?;
    }
    assert!(buffer.is_full());
    assert_eq!(buffer.used_bytes(), 16);
    assert_eq!(buffer.free_bytes(), 0);

    let mut drained = Vec::new();
    while let Ok(value) = buffer.read() {
        drained.push(value);
    }
    assert_eq!(drained, vec![10, 20, 30, 40]);
    assert_eq!(buffer.read().unwrap_err().code, codes::EMPTY_CONTAINER);
    Ok(())
}

#[test]
fn test_swap_is_symmetric() -> Result<()> {
    let mut a = FixedVec::<i32, 4>::from_slice(&[1, 2, 3])?;
    let mut b = FixedVec::<i32, 4>::from_slice(&[9])?;
    a.swap(&mut b);
    assert_eq!((a.as_slice(), b.as_slice()), (&[9][..], &[1, 2, 3][..]));
    b.swap(&mut a);
    assert_eq!((a.as_slice(), b.as_slice()), (&[1, 2, 3][..], &[9][..]));

    let mut m = FixedMap::<u8, u8, 2>::new();
    let mut n = FixedMap::<u8, u8, 2>::new();
    m.insert(1, 1)?;
    m.swap(&mut n);
    assert!(m.is_empty());
    assert_eq!(n.find(&1)?, &1);
    Ok(())
}

#[test]
fn test_map_lookup_errors() -> Result<()> {
    let mut map = FixedMap::<&str, i32, 4>::new();
    map.insert("rpm", 1200)?;
    assert_eq!(map.find(&"temp").unwrap_err().code, codes::KEY_NOT_FOUND);
    map.insert("a", 0)?;
    map.insert("b", 0)?;
    map.insert("c", 0)?;
    let full = map.insert("d", 0).unwrap_err();
    assert_eq!(full.detail, Some(ErrorDetail::Capacity(4)));
    map.erase(&"c");
    assert_eq!(map.assign(&"temp", 1).unwrap_err().code, codes::KEY_NOT_FOUND);
    assert_eq!(map.assign(&"rpm", 1300)?, 1200);
    *map.entry("temp").or_insert(20)? += 1;
    assert_eq!(map.find(&"temp")?, &21);
    Ok(())
}

#[test]
fn test_platform_defaults() -> Result<()> {
    let mut stack = Stack::<u8>::new();
    while !stack.is_full() {
        stack.push(1)?;
    }
    assert_eq!(stack.len(), limits::DEFAULT_STACK_SIZE);

    let map = Map::<u8, u8>::new();
    assert_eq!(map.capacity(), limits::DEFAULT_MAP_ENTRIES);

    let history = History::<u8, { limits::DEFAULT_HISTORY_LEN }>::new();
    assert_eq!(history.capacity(), limits::DEFAULT_HISTORY_LEN);
    let _: FixedStack<u8, { limits::DEFAULT_STACK_SIZE }> = stack;
    Ok(())
}

// The library is built on core and alloc alone unless `std` is enabled.
#[cfg(all(feature = "alloc", not(feature = "std")))]
#[test]
fn test_core_only_build_keeps_full_api() -> Result<()> {
    use inplace_foundation::handle::make_shared;

    let mut vec = FixedVec::<u8, 2>::new();
    vec.push_back(1)?;
    let owner = make_shared(vec);
    let observer = owner.downgrade();
    assert_eq!(observer.try_lock()?.try_get()?.as_slice(), &[1]);
    drop(owner);
    assert_eq!(observer.try_lock().unwrap_err().code, codes::USE_AFTER_EXPIRY);
    Ok(())
}
