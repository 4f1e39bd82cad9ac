//! The built-in 256-color fallback palette.

/// The fallback palette substituted when `exact` receives unusable input or
/// analysis finds too few distinct colors to work with.
///
/// Constructed offline from a Halton sequence (bases 2, 3, 5) over Oklab,
/// clipped to the sRGB gamut and deduplicated on the RGB555 grid. Slot 0 is
/// the reserved transparent entry; slots 1 and 2 anchor near-black and
/// near-white so extreme tones always have a close match.
#[rustfmt::skip]
pub const HALTONIC: [u32; 256] = [
    0x00000000, 0x010101FF, 0xFEFEFEFF, 0xE9C7FDFF, 0x5E4420FF, 0xBDAE97FF,
    0xA54C28FF, 0x6B82C7FF, 0xC7317DFF, 0x7C3D44FF, 0xB599C5FF, 0x27305AFF,
    0xA638C4FF, 0xDFF4A1FF, 0x6CC65FFF, 0xA57EC7FF, 0xF0C843FF, 0x6F1ECAFF,
    0x53D3DBFF, 0x69726BFF, 0x342F75FF, 0x446582FF, 0x85A96FFF, 0x310B1EFF,
    0xAB6ED9FF, 0xC7C0FCFF, 0xB84C89FF, 0x6347E8FF, 0x6D3582FF, 0x759077FF,
    0x2807EBFF, 0xEF9B7AFF, 0x40232BFF, 0xE789B6FF, 0x9ADFBBFF, 0xD74FBCFF,
    0x4F224BFF, 0xAA784CFF, 0x0F76B5FF, 0x4B4B26FF, 0xA2BFC0FF, 0x0E0656FF,
    0x966257FF, 0xE24CDCFF, 0x2E77D3FF, 0xE46E06FF, 0x9D2F52FF, 0x929DDFFF,
    0xC0CB41FF, 0x4A26C3FF, 0xF1A8E2FF, 0x393F01FF, 0x478A7EFF, 0x852ED0FF,
    0xE26644FF, 0xCED379FF, 0x5B11E3FF, 0x0E131AFF, 0x397180FF, 0x0D2685FF,
    0x5B4A76FF, 0x6FBB80FF, 0xDFD4A2FF, 0xA95FABFF, 0xB4F4FDFF, 0xB62741FF,
    0xA58F88FF, 0x226198FF, 0x1E1F3BFF, 0xA64EBFFF, 0x3A6D44FF, 0xC687ADFF,
    0x6C1597FF, 0x59E3D9FF, 0x69046BFF, 0x817563FF, 0xDA8E33FF, 0x2C594DFF,
    0x039CB7FF, 0xBDAFDBFF, 0xA43265FF, 0xBD47E7FF, 0x3A166FFF, 0x656AF3FF,
    0xCD20A0FF, 0x813966FF, 0xB0AE68FF, 0x95C33BFF, 0x2A19B7FF, 0x483128FF,
    0x7637F2FF, 0xECDEE0FF, 0xD17D73FF, 0xDC10C0FF, 0x7999F7FF, 0xA4CC72FF,
    0xD84F26FF, 0xFB6BC5FF, 0x45132DFF, 0x7C67A6FF, 0x6E591BFF, 0xBA4EF2FF,
    0xB8CF9BFF, 0xAF6751FF, 0x100109FF, 0x3762B0FF, 0x7C91A5FF, 0x4848ADFF,
    0xEE95A7FF, 0x46785FFF, 0x9D63EAFF, 0x35A222FF, 0xE178CFFF, 0x5304A8FF,
    0xF2345FFF, 0x69878BFF, 0x161768FF, 0x543556FF, 0x42AB5AFF, 0xAF8CE5FF,
    0xAABEE8FF, 0x9C4F8DFF, 0xE5444DFF, 0x774F8DFF, 0xB8927DFF, 0x0212D9FF,
    0x1692EAFF, 0x3C3F33FF, 0xAAA8F2FF, 0xC3E3FDFF, 0x405A19FF, 0xA87B86FF,
    0xB817CCFF, 0x6B3591FF, 0x0D052AFF, 0x69CD93FF, 0x816210FF, 0xCBE88CFF,
    0x4B6148FF, 0x66BDCBFF, 0xEABFC7FF, 0xCD585BFF, 0xF26CE8FF, 0x6458D3FF,
    0xED8A4CFF, 0x79214AFF, 0x59A1CDFF, 0xABEC43FF, 0x2952D2FF, 0xDAA7CEFF,
    0x12856BFF, 0x7556F4FF, 0xEEF1DDFF, 0xEA826CFF, 0xF3B35DFF, 0x142521FF,
    0x7681D0FF, 0x7FCFF4FF, 0xE65A88FF, 0x5D2719FF, 0x867488FF, 0x45457BFF,
    0xABB874FF, 0x85548CFF, 0x982623FF, 0xA7A9ACFF, 0x463A8AFF, 0x618E3AFF,
    0x954FA8FF, 0x74C22AFF, 0xD863B0FF, 0xAF33F8FF, 0x5E41BAFF, 0x677351FF,
    0xA99748FF, 0x695B6AFF, 0xC8C7E7FF, 0xA75A70FF, 0xF42DF3FF, 0x4559D1FF,
    0xBAEBB6FF, 0xB822A5FF, 0x6C366CFF, 0xB47C5DFF, 0x60E670FF, 0xEC90E7FF,
    0x362F17FF, 0x07CF44FF, 0xD99798FF, 0x1F0D2BFF, 0x5A91FCFF, 0xA0E59CFF,
    0x7287B3FF, 0x6BA2A0FF, 0xCEB5A2FF, 0xC14233FF, 0xF9EC7DFF, 0x7968B6FF,
    0xDD316FFF, 0x913F32FF, 0x77A8C8FF, 0x2C3EAFFF, 0xF3AFCCFF, 0x452E67FF,
    0x099468FF, 0x7046BAFF, 0xEED496FF, 0x94A723FF, 0xBA68C6FF, 0x54C4D5FF,
    0xF96385FF, 0x7C636BFF, 0xF279F4FF, 0x475663FF, 0x48C362FF, 0xF49E62FF,
    0xC968E8FF, 0x123F23FF, 0x9D729AFF, 0x1966FBFF, 0xA78C6AFF, 0xFEA18BFF,
    0xA87A20FF, 0x052A28FF, 0x14751CFF, 0xE2748DFF, 0xA81EBAFF, 0x5C3380FF,
    0x0D1346FF, 0x59E4B8FF, 0xF33EC6FF, 0x681653FF, 0x728043FF, 0x6E452EFF,
    0x2D9A98FF, 0xA3B7C1FF, 0x9A4951FF, 0xE401D3FF, 0x6176E2FF, 0xEE5618FF,
    0xC3478EFF, 0x764B55FF, 0xAAA5D7FF, 0x473208FF, 0x9230DFFF, 0xD8ECC9FF,
    0xD97F57FF, 0x7D12DCFF, 0x52A3DEFF, 0x63718EFF, 0x352392FF, 0x1F6487FF,
    0x72B482FF, 0x370D2AFF, 0xA765DDFF, 0xEFB778FF,
];
