use assert_matches::assert_matches;
use wgpu_splat_core::{
    BufferWrapper, DownloadableBufferWrapper, FixedSizeBufferWrapper, FixedSizeBufferWrapperError,
    FrameUniformBuffer, FrameUniformPod, SplatIndexBuffer, SplatStore, SplatVertexBuffer,
    VisibilityPermutation,
};

use crate::common::{TestContext, given};


#[test]
#[cfg_attr(not(feature = "gpu-tests"), ignore = "requires the `gpu-tests` feature")]
fn test_buffer_wrapper_into_wgpu_buffer_should_keep_the_same_buffer() {
    let ctx = TestContext::new();
    let store = SplatStore::from(vec![given::splat_with_seed(3)]);
    let vertices = SplatVertexBuffer::new(&ctx.device, &store, 100.0);
    let inner = vertices.buffer().clone();

    let buffer = wgpu::Buffer::from(vertices);

    assert_eq!(&buffer, &inner);
    assert_eq!(buffer.buffer(), &inner);
}

#[test]
#[cfg_attr(not(feature = "gpu-tests"), ignore = "requires the `gpu-tests` feature")]
fn test_downloadable_buffer_wrapper_download_should_match_through_wrapper_and_raw_buffer() {
    let ctx = TestContext::new();
    let permutation = VisibilityPermutation(vec![3, 1, 0, 2]);
    let indices = SplatIndexBuffer::new(&ctx.device, &permutation);

    let through_wrapper = pollster::block_on(indices.download::<u32>(&ctx.device, &ctx.queue));
    let through_raw =
        pollster::block_on(indices.buffer().download::<u32>(&ctx.device, &ctx.queue));

    assert_matches!(through_wrapper, Ok(data) if data == permutation.to_indices());
    assert_matches!(through_raw, Ok(data) if data == permutation.to_indices());
}

#[test]
#[cfg_attr(not(feature = "gpu-tests"), ignore = "requires the `gpu-tests` feature")]
fn test_fixed_size_buffer_wrapper_verify_buffer_size_should_compare_with_frame_uniform_pod() {
    let ctx = TestContext::new();
    let create = |size: usize| {
        ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Test Frame Uniform Buffer"),
            size: size as wgpu::BufferAddress,
            usage: FrameUniformBuffer::DEFAULT_USAGES,
            mapped_at_creation: false,
        })
    };
    let pod_size = std::mem::size_of::<FrameUniformPod>();

    assert_matches!(
        FrameUniformBuffer::verify_buffer_size(&create(pod_size)),
        Ok(())
    );
    assert_matches!(
        FrameUniformBuffer::try_from(create(64)),
        Err(FixedSizeBufferWrapperError::BufferSizeMismatched {
            buffer_size: 64,
            expected_size: 80,
        })
    );
}
