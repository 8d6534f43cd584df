//! Layout assertions matching the ones `vix-abi-check` compiles against the header.

use crate::status::VixStatus;
use crate::types::{VixAllocator, VixBuf, VixMutBuf, VixStr};
use std::ffi::c_void;
use std::mem::{align_of, size_of};

const PTR: usize = size_of::<*const c_void>();
const PTR_ALIGN: usize = align_of::<*const c_void>();

const _: () = assert!(size_of::<usize>() == PTR);

const _: () = assert!(size_of::<VixStr>() == PTR + size_of::<usize>());
const _: () = assert!(align_of::<VixStr>() == PTR_ALIGN);

const _: () = assert!(size_of::<VixBuf>() == PTR + size_of::<usize>());
const _: () = assert!(align_of::<VixBuf>() == PTR_ALIGN);

const _: () = assert!(size_of::<VixMutBuf>() == PTR + size_of::<usize>());
const _: () = assert!(align_of::<VixMutBuf>() == PTR_ALIGN);

// int32 code, padding, then the view
const _: () = assert!(align_of::<VixStatus>() >= align_of::<VixStr>());
const _: () = assert!(size_of::<VixStatus>() == align_of::<VixStr>() + size_of::<VixStr>());

// Option<fn> is a nullable function pointer
const _: () = assert!(size_of::<VixAllocator>() == 3 * PTR);
const _: () = assert!(align_of::<VixAllocator>() == PTR_ALIGN);

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn field_order() {
        assert_eq!(offset_of!(VixStr, ptr), 0);
        assert_eq!(offset_of!(VixStr, len), PTR);
        assert_eq!(offset_of!(VixMutBuf, cap), PTR);
        assert_eq!(offset_of!(VixStatus, code), 0);
        assert_eq!(offset_of!(VixStatus, message), align_of::<VixStr>());
        assert_eq!(offset_of!(VixAllocator, alloc), 0);
        assert_eq!(offset_of!(VixAllocator, free), PTR);
        assert_eq!(offset_of!(VixAllocator, user), 2 * PTR);
    }
}
