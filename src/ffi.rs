use std::panic::{self, AssertUnwindSafe};
use std::slice;

use crate::error::{ClipError, OperationError, Result};
use crate::geometry::{Path, Paths, Point};
use crate::operations::boolean::{ClipType, Clipper, FillRule};
use crate::operations::offset::{EndType, Inflate, JoinType};

/// Status codes returned by every C ABI function.
///
/// Inputs cross the boundary as flat point arrays split into paths by start
/// offsets. Results come back as an opaque [`PolyclipPaths`] handle that the
/// caller reads through the accessor functions and releases with
/// [`polyclip_paths_free`].
pub const POLYCLIP_OK: i32 = 0;
pub const POLYCLIP_ERR_NULL_PTR: i32 = -1;
pub const POLYCLIP_ERR_INVALID_INPUT: i32 = -2;
pub const POLYCLIP_ERR_NUMERIC_OVERFLOW: i32 = -3;
pub const POLYCLIP_ERR_UNSUPPORTED_PARAMETER: i32 = -4;
pub const POLYCLIP_ERR_OUT_OF_BOUNDS: i32 = -5;
pub const POLYCLIP_ERR_PANIC: i32 = -99;

/// A point as laid out in caller buffers.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PolyclipPoint {
    pub x: i64,
    pub y: i64,
}

impl From<Point> for PolyclipPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PolyclipPoint> for Point {
    fn from(p: PolyclipPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

/// A set of closed paths in flat form.
///
/// Path `i` holds the points from `path_starts[i]` up to the next start,
/// or up to `point_count` for the last path. Starts must be non-decreasing
/// and not exceed `point_count`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PolyclipPathsInput {
    pub points: *const PolyclipPoint,
    pub point_count: usize,
    pub path_starts: *const usize,
    pub path_count: usize,
}

/// Opaque result handle.
#[derive(Debug, Clone)]
pub struct PolyclipPaths(pub Paths);

fn status_of(err: &ClipError) -> i32 {
    if err.is_unsupported_parameter() {
        POLYCLIP_ERR_UNSUPPORTED_PARAMETER
    } else if err.is_numeric_overflow() {
        POLYCLIP_ERR_NUMERIC_OVERFLOW
    } else {
        POLYCLIP_ERR_INVALID_INPUT
    }
}

fn catch(body: impl FnOnce() -> i32) -> i32 {
    panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or(POLYCLIP_ERR_PANIC)
}

fn malformed(msg: &str) -> ClipError {
    OperationError::InvalidInput(msg.to_owned()).into()
}

/// Reads a flat input into closed paths.
///
/// # Safety
///
/// Non-null pointers in `input` must be valid for their stated counts.
unsafe fn read_input(input: &PolyclipPathsInput) -> Result<Paths> {
    if input.path_count == 0 {
        return Ok(Paths::default());
    }
    if input.path_starts.is_null() || (input.point_count > 0 && input.points.is_null()) {
        return Err(malformed("null buffer with non-zero count"));
    }
    let starts = slice::from_raw_parts(input.path_starts, input.path_count);
    let points: &[PolyclipPoint] = if input.point_count == 0 {
        &[]
    } else {
        slice::from_raw_parts(input.points, input.point_count)
    };
    let mut paths = Paths::default();
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(points.len());
        if start > end || end > points.len() {
            return Err(malformed("path starts out of order or past the point buffer"));
        }
        paths.push(Path::closed(points[start..end].iter().copied()));
    }
    Ok(paths)
}

/// Hands `result` to the caller through `out`.
unsafe fn write_result(result: Result<Paths>, out: *mut *mut PolyclipPaths) -> i32 {
    match result {
        Ok(paths) => {
            out.write(Box::into_raw(Box::new(PolyclipPaths(paths))));
            POLYCLIP_OK
        }
        Err(err) => {
            out.write(std::ptr::null_mut());
            status_of(&err)
        }
    }
}

/// Runs a Boolean operation.
///
/// `clip_type` and `fill_rule` use the integer codes of [`ClipType`] and
/// [`FillRule`]. `clip` may be null, which means no clip paths.
///
/// # Safety
///
/// - `subject` must point to a valid [`PolyclipPathsInput`] whose buffers
///   are valid for their counts; the same holds for a non-null `clip`
/// - `result` must be a valid pointer to a `*mut PolyclipPaths`
/// - On success the caller must release `*result` with
///   [`polyclip_paths_free`]
#[no_mangle]
pub unsafe extern "C" fn polyclip_boolean(
    clip_type: i32,
    fill_rule: i32,
    subject: *const PolyclipPathsInput,
    clip: *const PolyclipPathsInput,
    result: *mut *mut PolyclipPaths,
) -> i32 {
    if subject.is_null() || result.is_null() {
        return POLYCLIP_ERR_NULL_PTR;
    }
    catch(|| {
        let run = || -> Result<Paths> {
            let clip_type = ClipType::try_from(i64::from(clip_type))?;
            let fill_rule = FillRule::try_from(i64::from(fill_rule))?;
            let subject = read_input(&*subject)?;
            let clip = if clip.is_null() {
                Paths::default()
            } else {
                read_input(&*clip)?
            };
            Clipper::new()
                .with_subject(&subject)
                .with_clip(&clip)
                .execute(clip_type, fill_rule)
        };
        write_result(run(), result)
    })
}

/// Offsets a path set.
///
/// `join_type` and `end_type` use the integer codes of [`JoinType`] and
/// [`EndType`].
///
/// # Safety
///
/// - `paths` must point to a valid [`PolyclipPathsInput`] whose buffers are
///   valid for their counts
/// - `result` must be a valid pointer to a `*mut PolyclipPaths`
/// - On success the caller must release `*result` with
///   [`polyclip_paths_free`]
#[no_mangle]
pub unsafe extern "C" fn polyclip_inflate(
    paths: *const PolyclipPathsInput,
    delta: f64,
    join_type: i32,
    end_type: i32,
    miter_limit: f64,
    arc_tolerance: f64,
    result: *mut *mut PolyclipPaths,
) -> i32 {
    if paths.is_null() || result.is_null() {
        return POLYCLIP_ERR_NULL_PTR;
    }
    catch(|| {
        let run = || -> Result<Paths> {
            let join_type = JoinType::try_from(i64::from(join_type))?;
            let end_type = EndType::try_from(i64::from(end_type))?;
            let input = read_input(&*paths)?;
            Inflate::new(input, delta)
                .with_join_type(join_type)
                .with_end_type(end_type)
                .with_miter_limit(miter_limit)
                .with_arc_tolerance(arc_tolerance)
                .execute()
        };
        write_result(run(), result)
    })
}

/// Writes the number of paths in `paths` to `count`.
///
/// # Safety
///
/// `paths` must be a handle returned by this library and not yet freed;
/// `count` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn polyclip_paths_count(
    paths: *const PolyclipPaths,
    count: *mut usize,
) -> i32 {
    if paths.is_null() || count.is_null() {
        return POLYCLIP_ERR_NULL_PTR;
    }
    count.write((*paths).0.len());
    POLYCLIP_OK
}

/// Writes the vertex count of path `index` to `len`.
///
/// # Safety
///
/// Same as [`polyclip_paths_count`].
#[no_mangle]
pub unsafe extern "C" fn polyclip_paths_path_len(
    paths: *const PolyclipPaths,
    index: usize,
    len: *mut usize,
) -> i32 {
    if paths.is_null() || len.is_null() {
        return POLYCLIP_ERR_NULL_PTR;
    }
    match (*paths).0.get(index) {
        Some(path) => {
            len.write(path.len());
            POLYCLIP_OK
        }
        None => POLYCLIP_ERR_OUT_OF_BOUNDS,
    }
}

/// Copies the vertices of path `index` into `buffer`.
///
/// Use [`polyclip_paths_path_len`] to size the buffer; a `capacity` below
/// the path length is rejected.
///
/// # Safety
///
/// `paths` must be a live handle and `buffer` must be valid for `capacity`
/// writes.
#[no_mangle]
pub unsafe extern "C" fn polyclip_paths_copy_path(
    paths: *const PolyclipPaths,
    index: usize,
    buffer: *mut PolyclipPoint,
    capacity: usize,
) -> i32 {
    if paths.is_null() || buffer.is_null() {
        return POLYCLIP_ERR_NULL_PTR;
    }
    let Some(path) = (*paths).0.get(index) else {
        return POLYCLIP_ERR_OUT_OF_BOUNDS;
    };
    if capacity < path.len() {
        return POLYCLIP_ERR_OUT_OF_BOUNDS;
    }
    let out = slice::from_raw_parts_mut(buffer, path.len());
    for (slot, p) in out.iter_mut().zip(path.iter()) {
        *slot = (*p).into();
    }
    POLYCLIP_OK
}

/// Releases a result handle. Null is ignored.
///
/// # Safety
///
/// `paths` must be null or a handle returned by this library that has not
/// been freed yet.
#[no_mangle]
pub unsafe extern "C" fn polyclip_paths_free(paths: *mut PolyclipPaths) {
    if !paths.is_null() {
        drop(Box::from_raw(paths));
    }
}
