mod test_plane_basic;
