//! Entry Point Signatures
//!
//! One `extern "C"` function-pointer type per native entry point. Structs
//! the native API takes or returns by value (`CvSize`, `CvRect`,
//! `CvScalar`) appear by value here too; headers travel by pointer.

use entities_mat_types::{CvRect, CvScalar, CvSize};
use libc::{c_double, c_int};

use crate::layout::{CvArr, CvMat, IplImage};

// --- Allocation, cloning and release ---

/// `CvMat* cvCreateMat(int rows, int cols, int type)`
pub type CvCreateMatFn = unsafe extern "C" fn(rows: c_int, cols: c_int, type_: c_int) -> *mut CvMat;
/// `IplImage* cvCreateImage(CvSize size, int depth, int channels)`
pub type CvCreateImageFn =
    unsafe extern "C" fn(size: CvSize, depth: c_int, channels: c_int) -> *mut IplImage;
/// `IplImage* cvCloneImage(const IplImage* image)`
pub type CvCloneImageFn = unsafe extern "C" fn(image: *const IplImage) -> *mut IplImage;
/// `CvMat* cvCloneMat(const CvMat* mat)`
pub type CvCloneMatFn = unsafe extern "C" fn(mat: *const CvMat) -> *mut CvMat;
/// `void cvReleaseMat(CvMat** mat)`
pub type CvReleaseMatFn = unsafe extern "C" fn(mat: *mut *mut CvMat);
/// `void cvReleaseImage(IplImage** image)`
pub type CvReleaseImageFn = unsafe extern "C" fn(image: *mut *mut IplImage);

// --- Whole-array operations ---

/// `void cvCopy(const CvArr* src, CvArr* dst, const CvArr* mask)`
pub type CvCopyFn = unsafe extern "C" fn(src: *const CvArr, dst: *mut CvArr, mask: *const CvArr);
/// `void cvSet(CvArr* arr, CvScalar value, const CvArr* mask)`
pub type CvSetFn = unsafe extern "C" fn(arr: *mut CvArr, value: CvScalar, mask: *const CvArr);
/// `void cvAddWeighted(const CvArr* src1, double alpha, const CvArr* src2,
/// double beta, double gamma, CvArr* dst)`
pub type CvAddWeightedFn = unsafe extern "C" fn(
    src1: *const CvArr,
    alpha: c_double,
    src2: *const CvArr,
    beta: c_double,
    gamma: c_double,
    dst: *mut CvArr,
);
/// `void cvSetIdentity(CvArr* mat, CvScalar value)`
pub type CvSetIdentityFn = unsafe extern "C" fn(mat: *mut CvArr, value: CvScalar);
/// `void cvTranspose(const CvArr* src, CvArr* dst)`
pub type CvTransposeFn = unsafe extern "C" fn(src: *const CvArr, dst: *mut CvArr);
/// `void cvSetZero(CvArr* arr)`
pub type CvSetZeroFn = unsafe extern "C" fn(arr: *mut CvArr);
/// `int cvGetElemType(const CvArr* arr)`
pub type CvGetElemTypeFn = unsafe extern "C" fn(arr: *const CvArr) -> c_int;

// --- Region of interest ---

/// `void cvSetImageROI(IplImage* image, CvRect rect)`
pub type CvSetImageRoiFn = unsafe extern "C" fn(image: *mut IplImage, rect: CvRect);
/// `CvRect cvGetImageROI(const IplImage* image)`
pub type CvGetImageRoiFn = unsafe extern "C" fn(image: *const IplImage) -> CvRect;
/// `void cvResetImageROI(IplImage* image)`
pub type CvResetImageRoiFn = unsafe extern "C" fn(image: *mut IplImage);

// --- Element access ---

/// `CvScalar cvGet1D(const CvArr* arr, int idx0)`
pub type CvGet1DFn = unsafe extern "C" fn(arr: *const CvArr, idx0: c_int) -> CvScalar;
/// `CvScalar cvGet2D(const CvArr* arr, int idx0, int idx1)`
pub type CvGet2DFn = unsafe extern "C" fn(arr: *const CvArr, idx0: c_int, idx1: c_int) -> CvScalar;
/// `CvScalar cvGet3D(const CvArr* arr, int idx0, int idx1, int idx2)`
pub type CvGet3DFn =
    unsafe extern "C" fn(arr: *const CvArr, idx0: c_int, idx1: c_int, idx2: c_int) -> CvScalar;

/// `double cvGetReal1D(const CvArr* arr, int idx0)`
pub type CvGetReal1DFn = unsafe extern "C" fn(arr: *const CvArr, idx0: c_int) -> c_double;
/// `double cvGetReal2D(const CvArr* arr, int idx0, int idx1)`
pub type CvGetReal2DFn =
    unsafe extern "C" fn(arr: *const CvArr, idx0: c_int, idx1: c_int) -> c_double;
/// `double cvGetReal3D(const CvArr* arr, int idx0, int idx1, int idx2)`
pub type CvGetReal3DFn =
    unsafe extern "C" fn(arr: *const CvArr, idx0: c_int, idx1: c_int, idx2: c_int) -> c_double;

/// `void cvSet1D(CvArr* arr, int idx0, CvScalar value)`
pub type CvSet1DFn = unsafe extern "C" fn(arr: *mut CvArr, idx0: c_int, value: CvScalar);
/// `void cvSet2D(CvArr* arr, int idx0, int idx1, CvScalar value)`
pub type CvSet2DFn =
    unsafe extern "C" fn(arr: *mut CvArr, idx0: c_int, idx1: c_int, value: CvScalar);
/// `void cvSet3D(CvArr* arr, int idx0, int idx1, int idx2, CvScalar value)`
pub type CvSet3DFn = unsafe extern "C" fn(
    arr: *mut CvArr,
    idx0: c_int,
    idx1: c_int,
    idx2: c_int,
    value: CvScalar,
);

/// `void cvSetReal1D(CvArr* arr, int idx0, double value)`
pub type CvSetReal1DFn = unsafe extern "C" fn(arr: *mut CvArr, idx0: c_int, value: c_double);
/// `void cvSetReal2D(CvArr* arr, int idx0, int idx1, double value)`
pub type CvSetReal2DFn =
    unsafe extern "C" fn(arr: *mut CvArr, idx0: c_int, idx1: c_int, value: c_double);
/// `void cvSetReal3D(CvArr* arr, int idx0, int idx1, int idx2, double value)`
pub type CvSetReal3DFn = unsafe extern "C" fn(
    arr: *mut CvArr,
    idx0: c_int,
    idx1: c_int,
    idx2: c_int,
    value: c_double,
);
